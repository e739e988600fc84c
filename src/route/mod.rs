pub(crate) mod composer;
pub(crate) mod directions;
pub(crate) mod polyline;
pub(crate) mod waypoint;
