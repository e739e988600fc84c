pub(crate) mod hours;
pub(crate) mod layout;
pub(crate) mod raster;
pub(crate) mod renderer;
pub(crate) mod scene;
pub(crate) mod viewer;
