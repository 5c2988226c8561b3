//! Rule table: which paths each zone of the backend may not mention.

use std::path::Path;

/// Part of the backend a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Zone {
    /// `domain/contact/**` and `domain/site_route.rs`.
    PureRules,
    /// The rest of `domain/`.
    Domain,
    /// `inbound/`.
    Inbound,
    /// `outbound/`.
    Outbound,
}

/// Domain modules holding side-effect-free rules.
const PURE_RULE_MODULES: [&str; 2] = ["contact", "site_route"];

impl Zone {
    /// Zone for a path relative to `backend/src`, if it is linted.
    pub fn of(file: &Path) -> Option<Self> {
        let mut parts = file.iter().map(|part| part.to_string_lossy());
        let root = parts.next()?;
        match &*root {
            "domain" => {
                let is_pure = parts.next().is_some_and(|module| {
                    let name = module.strip_suffix(".rs").unwrap_or(module.as_ref());
                    PURE_RULE_MODULES.contains(&name)
                });
                Some(if is_pure { Self::PureRules } else { Self::Domain })
            }
            "inbound" => Some(Self::Inbound),
            "outbound" => Some(Self::Outbound),
            _ => None,
        }
    }

    /// Name used in violation messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PureRules => "pure rule",
            Self::Domain => "domain",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }
}

/// Family a broken rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    /// Dependency direction between layers and infrastructure crates.
    Layering,
    /// Reading the system clock instead of an injected `Clock`.
    WallClock,
    /// I/O, logging or async machinery inside validation and routing rules.
    PureRules,
}

impl Rule {
    /// Stable tag shown in reports.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Layering => "layering",
            Self::WallClock => "wall-clock",
            Self::PureRules => "pure-rules",
        }
    }
}

/// What a rule forbids.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Target {
    /// A backend module prefix, e.g. `outbound`.
    Module(&'static [&'static str]),
    /// An external crate root.
    Crate(&'static str),
    /// A run of path segments anywhere in an external path, e.g. `Utc::now`.
    Call(&'static [&'static str]),
}

#[derive(Debug)]
pub(crate) struct ZoneRule {
    pub(crate) rule: Rule,
    pub(crate) target: Target,
    pub(crate) reason: &'static str,
}

const fn layering(target: Target, reason: &'static str) -> ZoneRule {
    ZoneRule {
        rule: Rule::Layering,
        target,
        reason,
    }
}

const WEB_STACK: &str = "HTTP concerns belong to inbound adapters";
const RELAY_STACK: &str = "outbound calls go through a driven port";

static DOMAIN_LAYERING: [ZoneRule; 13] = [
    layering(Target::Module(&["inbound"]), "adapters depend on the domain"),
    layering(Target::Module(&["outbound"]), "adapters depend on the domain"),
    layering(Target::Crate("actix"), WEB_STACK),
    layering(Target::Crate("actix_http"), WEB_STACK),
    layering(Target::Crate("actix_service"), WEB_STACK),
    layering(Target::Crate("actix_session"), WEB_STACK),
    layering(Target::Crate("actix_web"), WEB_STACK),
    layering(Target::Crate("utoipa"), WEB_STACK),
    layering(Target::Crate("reqwest"), RELAY_STACK),
    layering(Target::Crate("prometheus"), "metrics go through the ContactMetrics port"),
    layering(Target::Crate("actix_web_prom"), "request metrics are server wiring"),
    layering(Target::Crate("ortho_config"), "settings are loaded by adapters"),
    layering(Target::Crate("utoipa_swagger_ui"), "API docs are server wiring"),
];

static INBOUND_LAYERING: [ZoneRule; 3] = [
    layering(
        Target::Module(&["outbound"]),
        "handlers reach adapters through HttpState ports",
    ),
    layering(Target::Crate("reqwest"), RELAY_STACK),
    layering(Target::Crate("prometheus"), "metrics go through the ContactMetrics port"),
];

static OUTBOUND_LAYERING: [ZoneRule; 6] = [
    layering(Target::Module(&["inbound"]), "driven adapters never call back into handlers"),
    layering(Target::Crate("actix"), WEB_STACK),
    layering(Target::Crate("actix_http"), WEB_STACK),
    layering(Target::Crate("actix_session"), WEB_STACK),
    layering(Target::Crate("actix_web"), WEB_STACK),
    layering(Target::Crate("utoipa"), WEB_STACK),
];

const CLOCK: &str = "read time through mockable::Clock";

static WALL_CLOCK: [ZoneRule; 4] = [
    ZoneRule {
        rule: Rule::WallClock,
        target: Target::Call(&["Utc", "now"]),
        reason: CLOCK,
    },
    ZoneRule {
        rule: Rule::WallClock,
        target: Target::Call(&["Local", "now"]),
        reason: CLOCK,
    },
    ZoneRule {
        rule: Rule::WallClock,
        target: Target::Call(&["SystemTime", "now"]),
        reason: CLOCK,
    },
    ZoneRule {
        rule: Rule::WallClock,
        target: Target::Call(&["Instant", "now"]),
        reason: CLOCK,
    },
];

const fn pure(target: Target, reason: &'static str) -> ZoneRule {
    ZoneRule {
        rule: Rule::PureRules,
        target,
        reason,
    }
}

const NO_IO: &str = "validation and routing rules perform no I/O";

static PURE_RULES: [ZoneRule; 10] = [
    pure(Target::Call(&["std", "fs"]), NO_IO),
    pure(Target::Call(&["std", "net"]), NO_IO),
    pure(Target::Call(&["std", "env"]), NO_IO),
    pure(Target::Call(&["std", "process"]), NO_IO),
    pure(Target::Call(&["std", "io"]), NO_IO),
    pure(Target::Crate("tokio"), "validation and routing rules are synchronous"),
    pure(Target::Crate("async_trait"), "validation and routing rules are synchronous"),
    pure(Target::Crate("tracing"), "callers decide what to log"),
    pure(Target::Crate("mockable"), "callers pass the values the rules need"),
    pure(
        Target::Module(&["domain", "ports"]),
        "ports are driven by services, not by rules",
    ),
];

/// Every rule that applies to `zone`.
pub(crate) fn rules_for(zone: Zone) -> impl Iterator<Item = &'static ZoneRule> {
    let in_domain = matches!(zone, Zone::PureRules | Zone::Domain);
    let layering: &'static [ZoneRule] = match zone {
        Zone::PureRules | Zone::Domain => &DOMAIN_LAYERING,
        Zone::Inbound => &INBOUND_LAYERING,
        Zone::Outbound => &OUTBOUND_LAYERING,
    };
    let clock: &'static [ZoneRule] = if in_domain { &WALL_CLOCK } else { &[] };
    let purity: &'static [ZoneRule] = if zone == Zone::PureRules {
        &PURE_RULES
    } else {
        &[]
    };
    layering.iter().chain(clock).chain(purity)
}
