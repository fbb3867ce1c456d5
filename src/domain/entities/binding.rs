use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Owning context partitioning anchors (a guild/server).
pub type ScopeId = String;
/// The object a set of triggers is attached to (a message).
pub type AnchorId = String;
/// A user-activatable identifier bound to an effect (a button).
pub type TriggerId = String;
/// A grantable/revocable attribute applied to an actor (a role).
pub type EffectId = String;
/// The end user activating a trigger.
pub type ActorId = String;

/// Complete registry state: scope -> anchor -> bindings in display order.
///
/// `BTreeMap` keeps the serialized form stable across save/load cycles.
pub type FullState = BTreeMap<ScopeId, BTreeMap<AnchorId, Vec<Binding>>>;

/// Label used when the operator attaches a trigger without one.
pub const DEFAULT_LABEL: &str = "\u{1F518}";

/// Display variant for a trigger button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    Red,
    Green,
    Blurple,
    Grey,
}

impl ButtonStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonStyle::Red => "red",
            ButtonStyle::Green => "green",
            ButtonStyle::Blurple => "blurple",
            ButtonStyle::Grey => "grey",
        }
    }

    /// Uniform pick, used when the operator gives no style.
    pub fn random() -> Self {
        match rand::thread_rng().gen_range(0..4) {
            0 => ButtonStyle::Red,
            1 => ButtonStyle::Green,
            2 => ButtonStyle::Blurple,
            _ => ButtonStyle::Grey,
        }
    }
}

impl FromStr for ButtonStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "red" => Ok(ButtonStyle::Red),
            "green" => Ok(ButtonStyle::Green),
            "blurple" => Ok(ButtonStyle::Blurple),
            "grey" | "gray" => Ok(ButtonStyle::Grey),
            other => Err(format!("unknown button style: {}", other)),
        }
    }
}

/// One trigger -> effect rule attached to an anchor.
///
/// Bindings are never mutated in place; replacing the label, style or
/// effect is modeled as detach-then-attach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub scope_id: ScopeId,
    pub anchor_id: AnchorId,
    pub trigger_id: TriggerId,
    pub effect_id: EffectId,
    pub label: String,
    pub style: ButtonStyle,
    pub created_at: DateTime<Utc>,
}

impl Binding {
    pub fn new(
        scope_id: impl Into<ScopeId>,
        anchor_id: impl Into<AnchorId>,
        trigger_id: impl Into<TriggerId>,
        effect_id: impl Into<EffectId>,
    ) -> Self {
        Self {
            scope_id: scope_id.into(),
            anchor_id: anchor_id.into(),
            trigger_id: trigger_id.into(),
            effect_id: effect_id.into(),
            label: DEFAULT_LABEL.to_string(),
            style: ButtonStyle::Grey,
            created_at: Utc::now(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }

    /// The uniqueness key of this binding within a registry.
    pub fn key(&self) -> BindingKey {
        BindingKey {
            scope_id: self.scope_id.clone(),
            anchor_id: self.anchor_id.clone(),
            trigger_id: self.trigger_id.clone(),
        }
    }
}

/// Uniqueness key: at most one binding per (scope, anchor, trigger).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BindingKey {
    pub scope_id: ScopeId,
    pub anchor_id: AnchorId,
    pub trigger_id: TriggerId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_parse_known_names() {
        assert_eq!("red".parse::<ButtonStyle>().unwrap(), ButtonStyle::Red);
        assert_eq!("Green".parse::<ButtonStyle>().unwrap(), ButtonStyle::Green);
        assert_eq!("BLURPLE".parse::<ButtonStyle>().unwrap(), ButtonStyle::Blurple);
        assert_eq!("gray".parse::<ButtonStyle>().unwrap(), ButtonStyle::Grey);
    }

    #[test]
    fn style_parse_rejects_unknown() {
        assert!("magenta".parse::<ButtonStyle>().is_err());
    }

    #[test]
    fn style_serializes_as_lowercase_name() {
        let json = serde_json::to_string(&ButtonStyle::Blurple).unwrap();
        assert_eq!(json, "\"blurple\"");
    }

    #[test]
    fn binding_defaults() {
        let b = Binding::new("s1", "a1", "t1", "r1");
        assert_eq!(b.label, DEFAULT_LABEL);
        assert_eq!(b.style, ButtonStyle::Grey);
    }

    #[test]
    fn binding_key_identity() {
        let a = Binding::new("s1", "a1", "t1", "r1");
        let b = Binding::new("s1", "a1", "t1", "r2").with_label("x");
        // Same key even though effect and label differ.
        assert_eq!(a.key(), b.key());
    }
}
