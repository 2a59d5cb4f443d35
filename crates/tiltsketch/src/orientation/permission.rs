//! Whether, and how, orientation data may be obtained.
//!
//! Driven by discrete events so it can be exercised without a browser:
//!
//! ```text
//! Unsupported                                   (terminal, fallback gravity)
//! NotRequested ──UserGesture──▶ Requesting ──Granted──▶ Granted
//!      │                            └──Denied/Failed──▶ Denied (terminal)
//!      └──ApiResult without gesture──────────────────▶ Denied
//! ```
//!
//! Platforms that need no consent go straight to `Granted`.

use crate::error::OrientationError;

/// What the browser offers, probed once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrientationCapability {
    /// No orientation API at all.
    #[default]
    Unsupported,
    /// The API exists but must be unlocked from a user gesture.
    ConsentGated,
    /// Events flow as soon as a listener is attached.
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Unsupported,
    NotRequested,
    Requesting,
    Granted,
    Denied,
}

impl PermissionState {
    /// Numeric code written into the shared buffer header.
    pub fn code(self) -> f32 {
        match self {
            PermissionState::Unsupported => 0.0,
            PermissionState::NotRequested => 1.0,
            PermissionState::Requesting => 2.0,
            PermissionState::Granted => 3.0,
            PermissionState::Denied => 4.0,
        }
    }
}

/// Outcome of the platform permission call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionResponse {
    Granted,
    Denied,
    /// The call threw or its promise rejected.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionEvent {
    UserGesture,
    ApiResult(PermissionResponse),
}

/// Work the platform layer must perform after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformRequest {
    /// Call the consent API. Must happen inside the current gesture handler.
    RequestPermission,
    AttachOrientationListener,
}

#[derive(Debug, Clone)]
pub struct PermissionNegotiator {
    state: PermissionState,
    fallback_reason: Option<OrientationError>,
    listener_requested: bool,
    started: bool,
}

impl PermissionNegotiator {
    pub fn new() -> Self {
        Self {
            state: PermissionState::NotRequested,
            fallback_reason: None,
            listener_requested: false,
            started: false,
        }
    }

    /// Resolve the initial state from the probed capability. Only the first
    /// call has any effect.
    pub fn start(&mut self, capability: OrientationCapability) -> Option<PlatformRequest> {
        if self.started {
            log::debug!("permission already started; ignoring {:?}", capability);
            return None;
        }
        self.started = true;
        match capability {
            OrientationCapability::Unsupported => {
                self.fall_back(PermissionState::Unsupported, OrientationError::Unsupported);
                None
            }
            OrientationCapability::ConsentGated => {
                log::info!("device orientation needs consent; waiting for a user gesture");
                None
            }
            OrientationCapability::Open => {
                log::info!("device orientation available without consent");
                self.grant()
            }
        }
    }

    pub fn handle(&mut self, event: PermissionEvent) -> Option<PlatformRequest> {
        match (self.state, event) {
            (PermissionState::NotRequested, PermissionEvent::UserGesture) => {
                self.transition(PermissionState::Requesting);
                Some(PlatformRequest::RequestPermission)
            }
            (PermissionState::NotRequested, PermissionEvent::ApiResult(response)) => {
                // A request made outside a gesture; platforms reject these.
                log::warn!("permission result {:?} arrived without a user gesture", response);
                self.fall_back(PermissionState::Denied, OrientationError::PermissionDenied);
                None
            }
            (PermissionState::Requesting, PermissionEvent::ApiResult(PermissionResponse::Granted)) => {
                self.grant()
            }
            (PermissionState::Requesting, PermissionEvent::ApiResult(PermissionResponse::Denied)) => {
                self.fall_back(PermissionState::Denied, OrientationError::PermissionDenied);
                None
            }
            (PermissionState::Requesting, PermissionEvent::ApiResult(PermissionResponse::Failed(msg))) => {
                self.fall_back(PermissionState::Denied, OrientationError::RequestFailed(msg));
                None
            }
            (state, event) => {
                log::debug!("permission event {:?} ignored in state {:?}", event, state);
                None
            }
        }
    }

    pub fn state(&self) -> PermissionState {
        self.state
    }

    /// Why orientation will never arrive, once that is known.
    pub fn fallback_reason(&self) -> Option<&OrientationError> {
        self.fallback_reason.as_ref()
    }

    /// Whether a listener has been requested this session.
    pub fn listener_requested(&self) -> bool {
        self.listener_requested
    }

    fn grant(&mut self) -> Option<PlatformRequest> {
        self.transition(PermissionState::Granted);
        self.listener_requested = true;
        Some(PlatformRequest::AttachOrientationListener)
    }

    fn fall_back(&mut self, state: PermissionState, reason: OrientationError) {
        self.transition(state);
        log::warn!("{}; using static gravity for this session", reason);
        self.fallback_reason = Some(reason);
    }

    fn transition(&mut self, next: PermissionState) {
        log::info!("orientation permission: {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

impl Default for PermissionNegotiator {
    fn default() -> Self {
        Self::new()
    }
}
