pub(crate) mod decode;
pub(crate) mod svg_raster;
pub(crate) mod template;
pub(crate) mod text;
