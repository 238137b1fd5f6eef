//! Touch gesture synthesis: motion paths built here, played back by the
//! platform session.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument};

use crate::errors::AutomationError;
use crate::session::AccessibilitySession;

pub const TAP_DURATION: Duration = Duration::from_millis(100);
pub const LONG_PRESS_DURATION: Duration = Duration::from_millis(1000);
pub const DEFAULT_SWIPE_DURATION: Duration = Duration::from_millis(300);

/// One point of a stroke path, device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GesturePoint {
    pub x: f32,
    pub y: f32,
}

impl GesturePoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A timed path of points. Taps hold a single point for the whole duration;
/// swipes interpolate between their endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureStroke {
    pub points: Vec<GesturePoint>,
    pub start_delay: Duration,
    pub duration: Duration,
}

/// One or more strokes dispatched together.
#[derive(Debug, Clone, PartialEq)]
pub struct Gesture {
    pub strokes: Vec<GestureStroke>,
}

impl Gesture {
    fn single_stroke(points: Vec<GesturePoint>, duration: Duration) -> Self {
        Self {
            strokes: vec![GestureStroke {
                points,
                start_delay: Duration::ZERO,
                duration,
            }],
        }
    }

    pub fn tap(x: f32, y: f32) -> Self {
        Self::single_stroke(vec![GesturePoint::new(x, y)], TAP_DURATION)
    }

    pub fn long_press(x: f32, y: f32) -> Self {
        Self::single_stroke(vec![GesturePoint::new(x, y)], LONG_PRESS_DURATION)
    }

    pub fn swipe(start_x: f32, start_y: f32, end_x: f32, end_y: f32, duration: Duration) -> Self {
        Self::single_stroke(
            vec![
                GesturePoint::new(start_x, start_y),
                GesturePoint::new(end_x, end_y),
            ],
            duration,
        )
    }
}

/// Builds gestures and dispatches them through the connected session.
///
/// A `true` result means the platform accepted the dispatch request, not
/// that the target application reacted to it.
pub struct GestureSynthesizer {
    session: Arc<dyn AccessibilitySession>,
}

impl GestureSynthesizer {
    pub fn new(session: Arc<dyn AccessibilitySession>) -> Self {
        Self { session }
    }

    #[instrument(skip(self))]
    pub async fn tap(&self, x: f32, y: f32) -> Result<bool, AutomationError> {
        self.dispatch(Gesture::tap(x, y)).await
    }

    #[instrument(skip(self))]
    pub async fn long_press(&self, x: f32, y: f32) -> Result<bool, AutomationError> {
        self.dispatch(Gesture::long_press(x, y)).await
    }

    #[instrument(skip(self))]
    pub async fn swipe(
        &self,
        start_x: f32,
        start_y: f32,
        end_x: f32,
        end_y: f32,
        duration: Duration,
    ) -> Result<bool, AutomationError> {
        self.dispatch(Gesture::swipe(start_x, start_y, end_x, end_y, duration))
            .await
    }

    async fn dispatch(&self, gesture: Gesture) -> Result<bool, AutomationError> {
        let accepted = self.session.dispatch_gesture(&gesture).await?;
        if !accepted {
            debug!("platform refused gesture dispatch");
        }
        Ok(accepted)
    }
}
