pub(crate) mod eyes;
pub(crate) mod lantern;
pub(crate) mod magnetic;
pub(crate) mod parallax;
pub(crate) mod pointer;
pub(crate) mod trail;
