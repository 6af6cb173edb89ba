//! Named events and reserved command names on the wrapper channel.
//!
//! The wrapper's event dispatch is stringly typed on the wire.  [`EventName`]
//! closes the enumeration for the names the bridge actually handles while
//! keeping an `Other` variant as the extension point for wrapper events it
//! merely passes along (or ignores).

/// Reserved command name: the wrapper's channel-open control signal.
pub const CMD_OPENED: &str = "wrapperOpenedWebsocket";

/// Reserved command name: a host-initiated history push.
///
/// Commands with this name take the normal invocation round trip *and*
/// additionally feed the navigation bridge's outbound path.
pub const CMD_PUSH_STATE: &str = "wrapperPushState";

/// Remote query that returns the current site information.
///
/// Invoked eagerly once the channel opens so late host subscribers still
/// observe an initial state.
pub const CMD_SITE_INFO: &str = "siteInfo";

/// Wire name of the site-info push event.
const EVENT_SET_SITE_INFO: &str = "setSiteInfo";

/// Wire name of the browser back/forward navigation push event.
const EVENT_POP_STATE: &str = "wrapperPopState";

/// Internal name under which channel readiness is dispatched.
///
/// Not part of the wire namespace: readiness is raised only from the
/// channel-open control signal, so [`EventName::from_wire`] never produces
/// [`EventName::Ready`] — a wrapper push that happens to carry this string
/// lands in [`EventName::Other`] like any unknown name.
const EVENT_READY: &str = "zf-ready";

/// A named event on the wrapper channel, as seen by the fanout dispatcher.
///
/// Known names get their own variants so subscription sites are checked at
/// compile time; anything else lands in [`EventName::Other`] and is only
/// delivered to listeners that registered that exact string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventName {
    /// The channel became usable (dispatched at most once per lifetime).
    Ready,
    /// The wrapper pushed updated site information.
    SetSiteInfo,
    /// The wrapper reported a browser-level back/forward navigation.
    PopState,
    /// Any wrapper event this crate has no dedicated handling for.
    Other(String),
}

impl EventName {
    /// Maps a wire command name onto the enumeration.
    ///
    /// Never yields [`EventName::Ready`]: readiness is an internal dispatch
    /// raised from the channel-open signal, and a push frame spoofing its
    /// name must not reach ready subscribers.
    pub fn from_wire(cmd: &str) -> Self {
        match cmd {
            EVENT_SET_SITE_INFO => EventName::SetSiteInfo,
            EVENT_POP_STATE => EventName::PopState,
            other => EventName::Other(other.to_string()),
        }
    }

    /// The wire representation of this name.
    pub fn as_str(&self) -> &str {
        match self {
            EventName::Ready => EVENT_READY,
            EventName::SetSiteInfo => EVENT_SET_SITE_INFO,
            EventName::PopState => EVENT_POP_STATE,
            EventName::Other(name) => name,
        }
    }
}

impl std::fmt::Display for EventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
