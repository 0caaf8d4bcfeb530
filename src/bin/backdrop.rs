use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "backdrop", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write `backdrop.css` and `backdrop.html`.
    Build(BuildArgs),
    /// Print the policy report; fails when the scene breaks the policy.
    Check(SceneArgs),
    /// Dump the built-in scene as JSON.
    Preset(PresetArgs),
    /// Print evaluated layer states at time `t` as JSON.
    Sample(SampleArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Scene JSON. Defaults to the built-in dreamscape preset.
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Seed for the built-in preset.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Compile a static background.
    #[arg(long)]
    reduced_motion: bool,

    /// Handling of blurred moving layers.
    #[arg(long, value_enum, default_value_t = BlurChoice::Compensate)]
    blur: BlurChoice,
}

#[derive(Args, Debug)]
struct BuildArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output directory.
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct PresetArgs {
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Output file; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SampleArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Seconds after mount.
    #[arg(long, default_value_t = 0.0)]
    t: f64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BlurChoice {
    Compensate,
    Reject,
    Allow,
}

impl From<BlurChoice> for backdrop::BlurMode {
    fn from(c: BlurChoice) -> Self {
        match c {
            BlurChoice::Compensate => Self::Compensate,
            BlurChoice::Reject => Self::Reject,
            BlurChoice::Allow => Self::Allow,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("BACKDROP_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Build(args) => cmd_build(args),
        Command::Check(args) => cmd_check(args),
        Command::Preset(args) => cmd_preset(args),
        Command::Sample(args) => cmd_sample(args),
    }
}

fn load_scene(args: &SceneArgs) -> anyhow::Result<backdrop::Scene> {
    match &args.scene {
        Some(path) => backdrop::Scene::from_path(path)
            .with_context(|| format!("load scene '{}'", path.display())),
        None => backdrop::dreamscape(args.seed).context("build dreamscape preset"),
    }
}

fn compile_opts(args: &SceneArgs) -> backdrop::CompileOptions {
    backdrop::CompileOptions {
        motion: if args.reduced_motion {
            backdrop::MotionPreference::Reduced
        } else {
            backdrop::MotionPreference::Full
        },
        policy: backdrop::AnimationPolicy {
            blur: args.blur.into(),
            ..backdrop::AnimationPolicy::default()
        },
    }
}

fn compile(args: &SceneArgs) -> anyhow::Result<backdrop::RenderPlan> {
    let scene = load_scene(args)?;
    let plan = backdrop::compile_scene(&scene, &compile_opts(args)).context("compile scene")?;
    Ok(plan)
}

fn write_file(path: &Path, contents: &str) -> anyhow::Result<()> {
    std::fs::write(path, contents).with_context(|| format!("write '{}'", path.display()))
}

fn cmd_build(args: BuildArgs) -> anyhow::Result<()> {
    let plan = compile(&args.scene)?;
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    write_file(&args.out.join("backdrop.css"), &backdrop::render_css(&plan))?;
    write_file(&args.out.join("backdrop.html"), &backdrop::render_html(&plan))?;

    println!(
        "wrote {} layers ({} animated), fingerprint {}",
        plan.layers.len(),
        plan.animated().count(),
        plan.fingerprint.to_hex()
    );
    Ok(())
}

fn cmd_check(args: SceneArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args)?;
    let opts = compile_opts(&args);
    let report = opts.policy.check(&scene);
    println!("{}", serde_json::to_string_pretty(&report)?);
    if !report.is_clean() {
        for v in &report.violations {
            eprintln!("violation: {v}");
        }
        anyhow::bail!("{} policy violation(s)", report.violations.len());
    }
    Ok(())
}

fn cmd_preset(args: PresetArgs) -> anyhow::Result<()> {
    let json = backdrop::dreamscape(args.seed)?.to_json_pretty()?;
    match args.out {
        Some(path) => write_file(&path, &json),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let plan = compile(&args.scene)?;
    let frame = backdrop::Evaluator::eval_at(&plan, args.t)
        .with_context(|| format!("evaluate at t={}", args.t))?;
    println!("{}", serde_json::to_string_pretty(&frame)?);
    Ok(())
}
