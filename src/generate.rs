pub(crate) mod bokeh;
pub(crate) mod clouds;
pub(crate) mod particles;
