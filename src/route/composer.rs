use crate::foundation::error::TriplogError;
use crate::foundation::generation::{Generation, GenerationCounter, Tagged};
use crate::route::directions::{DirectionsService, RoutePath, RouteResult};
use crate::route::waypoint::{Waypoint, build_waypoints};
use crate::trip::model::Trip;

/// Turns trips into routes, tagging every request with a generation.
#[derive(Debug)]
pub struct RouteComposer<S> {
    service: S,
    generations: GenerationCounter,
}

impl<S: DirectionsService> RouteComposer<S> {
    /// Composer routing through `service`.
    pub fn new(service: S) -> Self {
        Self {
            service,
            generations: GenerationCounter::new(),
        }
    }

    /// Most recently issued generation.
    pub fn latest(&self) -> Generation {
        self.generations.latest()
    }

    /// Issue a generation for `trip` and build its waypoints.
    ///
    /// Returns `None` when the trip is not ready (no start or end coordinates). The generation is
    /// advanced either way, so requests still in flight for an earlier trip become stale.
    pub fn plan(&self, trip: &Trip) -> Option<(Generation, Vec<Waypoint>)> {
        let generation = self.generations.advance();
        match build_waypoints(trip) {
            Ok(w) => Some((generation, w)),
            Err(e) => {
                tracing::debug!(error = %e, "trip not ready for routing");
                None
            }
        }
    }

    /// Route `trip`. Every call supersedes the previous ones; `None` when the trip is not ready.
    #[tracing::instrument(skip(self, trip), fields(trip_id = ?trip.id))]
    pub async fn compose(&self, trip: &Trip) -> Option<Tagged<RouteResult>> {
        let (generation, waypoints) = self.plan(trip)?;
        Some(self.route_tagged(generation, &waypoints).await)
    }

    /// Route pre-built `waypoints` under an already issued `generation`.
    pub async fn route_tagged(
        &self,
        generation: Generation,
        waypoints: &[Waypoint],
    ) -> Tagged<RouteResult> {
        Tagged::new(generation, self.service.route(waypoints).await)
    }
}

/// What a route display shows.
#[derive(Debug, Default)]
pub enum RouteBoard {
    /// No trip with coordinates yet.
    #[default]
    NotReady,
    /// Waiting for the directions service.
    Pending(Generation),
    /// Route available.
    Ready(RoutePath),
    /// The directions service could not produce a route.
    Failed {
        /// Message for the user.
        message: String,
        /// Underlying error.
        error: TriplogError,
    },
}

impl RouteBoard {
    /// Mark the board as waiting for `generation`.
    pub fn begin(&mut self, generation: Generation) {
        *self = Self::Pending(generation);
    }

    /// Generation the board is waiting for, if any.
    pub fn pending(&self) -> Option<Generation> {
        match self {
            Self::Pending(g) => Some(*g),
            _ => None,
        }
    }

    /// Apply a finished request. Returns `false` when it is not the one the board waits for.
    pub fn accept(&mut self, outcome: Tagged<RouteResult>) -> bool {
        if self.pending() != Some(outcome.generation) {
            tracing::warn!(
                stale = outcome.generation.0,
                pending = ?self.pending().map(|g| g.0),
                "discarding stale route result"
            );
            return false;
        }
        *self = match outcome.value {
            Ok(path) => Self::Ready(path),
            Err(error) if error.is_not_ready() => Self::NotReady,
            Err(error) => {
                let message = error.user_message();
                tracing::warn!(%error, "route failed");
                Self::Failed { message, error }
            }
        };
        true
    }

    /// Route to draw, once available.
    pub fn path(&self) -> Option<&RoutePath> {
        match self {
            Self::Ready(p) => Some(p),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/route/composer.rs"]
mod tests;
