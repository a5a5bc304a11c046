use pkg_constants::traceflow::REASON_FW_RULE;
use pkg_types::traceflow::Observation;

/// Final disposition of the traced packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Delivered,
    Dropped,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Delivered => write!(f, "Delivered"),
            Verdict::Dropped => write!(f, "Dropped"),
        }
    }
}

/// An observation where a firewall rule dropped the packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirewallDrop {
    pub rule_id: Option<u64>,
    pub component_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub verdict: Verdict,
    pub drops: Vec<FirewallDrop>,
}

/// Scan every observation; each firewall drop is recorded, none short-circuits.
pub fn evaluate(observations: &[Observation]) -> Report {
    let drops: Vec<FirewallDrop> = observations
        .iter()
        .filter(|o| o.reason == REASON_FW_RULE)
        .map(|o| FirewallDrop {
            rule_id: o.acl_rule_id,
            component_name: o.component_name.clone(),
        })
        .collect();

    let verdict = if drops.is_empty() {
        Verdict::Delivered
    } else {
        Verdict::Dropped
    };
    Report { verdict, drops }
}

impl Report {
    /// Lines printed as the result of the run.
    pub fn lines(&self) -> Vec<String> {
        if self.drops.is_empty() {
            return vec![Verdict::Delivered.to_string()];
        }
        self.drops
            .iter()
            .map(|d| match d.rule_id {
                Some(id) => format!("Dropped Firewall RuleId: {}", id),
                None => "Dropped Firewall RuleId: unknown".to_string(),
            })
            .collect()
    }
}

/// One line per observation describing the simulated path.
pub fn path_lines(observations: &[Observation]) -> Vec<String> {
    observations
        .iter()
        .map(|o| {
            format!(
                "{:<28} {:<24} {:<24} {}",
                o.component_type,
                o.component_name,
                if o.lport_name.is_empty() { "-" } else { o.lport_name.as_str() },
                if o.reason.is_empty() { "-" } else { o.reason.as_str() },
            )
        })
        .collect()
}
