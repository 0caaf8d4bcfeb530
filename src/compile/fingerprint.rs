use crate::{
    animation::binding::{Direction, Repeat},
    compile::plan::{MotionPreference, NodeKind, PlannedLayer, RenderPlan},
    composition::model::{Fill, GradientStop},
    foundation::core::{Color, Length, Placement},
};

/// Stable 128-bit identity of a compiled plan, e.g. to name emitted stylesheets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
pub struct PlanFingerprint {
    pub hi: u64,
    pub lo: u64,
}

impl PlanFingerprint {
    pub fn to_hex(self) -> String {
        format!("{:016x}{:016x}", self.hi, self.lo)
    }
}

pub fn fingerprint_plan(plan: &RenderPlan) -> PlanFingerprint {
    let mut a = Fnv1a64::new(0xcbf29ce484222325);
    let mut b = Fnv1a64::new(0x9ae16a3b2f90404f);

    write_u64_pair(&mut a, &mut b, plan.seed);
    write_u8_pair(
        &mut a,
        &mut b,
        match plan.motion {
            MotionPreference::Full => 0,
            MotionPreference::Reduced => 1,
        },
    );

    write_u64_pair(&mut a, &mut b, plan.layers.len() as u64);
    for layer in &plan.layers {
        write_layer(&mut a, &mut b, layer);
    }

    // Timelines are hashed through their JSON form; the map is ordered by name.
    write_u64_pair(&mut a, &mut b, plan.timelines.len() as u64);
    for (name, tl) in &plan.timelines {
        write_str_pair(&mut a, &mut b, name);
        let json = serde_json::to_string(tl).unwrap_or_default();
        write_str_pair(&mut a, &mut b, &json);
    }

    PlanFingerprint {
        hi: a.finish(),
        lo: b.finish(),
    }
}

fn write_layer(a: &mut Fnv1a64, b: &mut Fnv1a64, l: &PlannedLayer) {
    write_str_pair(a, b, &l.id);
    match l.parent {
        Some(p) => {
            write_u8_pair(a, b, 1);
            write_u64_pair(a, b, p as u64);
        }
        None => write_u8_pair(a, b, 0),
    }
    write_str_pair(a, b, &format!("{:?}", l.kind));
    write_i64_pair(a, b, i64::from(l.z));
    write_placement(a, b, &l.placement);
    write_fill(a, b, &l.fill);
    write_f64_pair(a, b, l.blur_px);
    write_f64_pair(a, b, l.opacity);
    for c in l.transform.to_affine().as_coeffs() {
        write_f64_pair(a, b, c);
    }
    write_str_pair(a, b, l.blend.css_name());
    match &l.shadow {
        Some(s) => {
            write_u8_pair(a, b, 1);
            write_f64_pair(a, b, s.offset.x);
            write_f64_pair(a, b, s.offset.y);
            write_f64_pair(a, b, s.blur_px);
            write_f64_pair(a, b, s.spread_px);
            write_color_pair(a, b, s.color);
        }
        None => write_u8_pair(a, b, 0),
    }
    match &l.animation {
        Some(anim) => {
            write_u8_pair(a, b, 1);
            write_str_pair(a, b, &anim.name);
            write_f64_pair(a, b, anim.duration_s);
            write_f64_pair(a, b, anim.delay_s);
            write_str_pair(a, b, &anim.ease.to_css());
            match anim.repeat {
                Repeat::Infinite => write_u64_pair(a, b, u64::MAX),
                Repeat::Count(n) => write_u64_pair(a, b, u64::from(n)),
            }
            write_u8_pair(
                a,
                b,
                match anim.direction {
                    Direction::Normal => 0,
                    Direction::Alternate => 1,
                },
            );
        }
        None => write_u8_pair(a, b, 0),
    }
    if let NodeKind::Particle { shape } = l.kind {
        write_str_pair(a, b, shape.name());
    }
}

fn write_placement(a: &mut Fnv1a64, b: &mut Fnv1a64, p: &Placement) {
    for edge in [p.top, p.left, p.right, p.bottom] {
        match edge {
            Some(len) => {
                write_u8_pair(a, b, 1);
                write_length_pair(a, b, len);
            }
            None => write_u8_pair(a, b, 0),
        }
    }
    write_length_pair(a, b, p.width);
    write_length_pair(a, b, p.height);
    write_str_pair(a, b, &format!("{:?}", p.anchor));
}

fn write_fill(a: &mut Fnv1a64, b: &mut Fnv1a64, f: &Fill) {
    match f {
        Fill::None => write_u8_pair(a, b, 0),
        Fill::Solid(c) => {
            write_u8_pair(a, b, 1);
            write_color_pair(a, b, *c);
        }
        Fill::Linear { angle_deg, stops } => {
            write_u8_pair(a, b, 2);
            write_f64_pair(a, b, *angle_deg);
            write_stops(a, b, stops);
        }
        Fill::Radial {
            shape,
            center,
            stops,
        } => {
            write_u8_pair(a, b, 3);
            write_str_pair(a, b, &format!("{shape:?}"));
            write_f64_pair(a, b, center.x);
            write_f64_pair(a, b, center.y);
            write_stops(a, b, stops);
        }
        Fill::Conic {
            from_deg,
            center,
            stops,
        } => {
            write_u8_pair(a, b, 4);
            write_f64_pair(a, b, *from_deg);
            write_f64_pair(a, b, center.x);
            write_f64_pair(a, b, center.y);
            write_stops(a, b, stops);
        }
        Fill::Image { source } => {
            write_u8_pair(a, b, 5);
            write_str_pair(a, b, source);
        }
        Fill::Noise {
            base_frequency,
            octaves,
        } => {
            write_u8_pair(a, b, 6);
            write_f64_pair(a, b, *base_frequency);
            write_u64_pair(a, b, u64::from(*octaves));
        }
    }
}

fn write_stops(a: &mut Fnv1a64, b: &mut Fnv1a64, stops: &[GradientStop]) {
    write_u64_pair(a, b, stops.len() as u64);
    for s in stops {
        write_color_pair(a, b, s.color);
        write_f64_pair(a, b, s.at_pct);
    }
}

fn write_length_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, len: Length) {
    let tag = match len {
        Length::Percent(_) => 0,
        Length::Px(_) => 1,
        Length::Vw(_) => 2,
        Length::Vh(_) => 3,
    };
    write_u8_pair(a, b, tag);
    write_f64_pair(a, b, len.value());
}

fn write_color_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, c: Color) {
    for v in [c.r, c.g, c.b] {
        write_u8_pair(a, b, v);
    }
    write_f64_pair(a, b, c.a);
}

fn write_u8_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u8) {
    a.write_u8(v);
    b.write_u8(v);
}

fn write_u64_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u64) {
    a.write_u64(v);
    b.write_u64(v);
}

fn write_i64_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: i64) {
    write_u64_pair(a, b, v as u64);
}

fn write_f64_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: f64) {
    write_u64_pair(a, b, v.to_bits());
}

fn write_str_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, s: &str) {
    write_u64_pair(a, b, s.len() as u64);
    a.write_bytes(s.as_bytes());
    b.write_bytes(s.as_bytes());
}

#[derive(Clone, Copy)]
struct Fnv1a64(u64);

impl Fnv1a64 {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        self.0 = h;
    }

    fn finish(self) -> u64 {
        self.0
    }
}
