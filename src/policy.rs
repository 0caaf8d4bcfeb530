pub(crate) mod rules;
pub(crate) mod soften;
