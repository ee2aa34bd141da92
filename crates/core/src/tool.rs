//! Recorded tool invocations.
//!
//! A [`Tool`] is one step of a composition. Serializing a list of tools is
//! enough to replay a piece exactly.

use serde::{Deserialize, Serialize};

use crate::ink_drop::InkDrop;
use crate::pixel::Channel;
use crate::tine_line::TineLine;
use crate::warp::Warp;

/// One warp applied to a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum Tool<C = u16> {
    InkDrop(InkDrop<C>),
    TineLine(TineLine),
}

impl<C: Channel> Tool<C> {
    /// Short kebab-case name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Tool::InkDrop(_) => "ink-drop",
            Tool::TineLine(_) => "tine-line",
        }
    }

    /// The underlying inverse mapping.
    pub fn as_warp(&self) -> &dyn Warp {
        match self {
            Tool::InkDrop(d) => d,
            Tool::TineLine(t) => t,
        }
    }
}

impl<C> From<InkDrop<C>> for Tool<C> {
    fn from(d: InkDrop<C>) -> Self {
        Tool::InkDrop(d)
    }
}

impl<C> From<TineLine> for Tool<C> {
    fn from(t: TineLine) -> Self {
        Tool::TineLine(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Rgb;
    use glam::DVec2;

    fn drop() -> Tool<u16> {
        InkDrop::new(DVec2::new(4.0, 5.0), 3.0, Rgb::new(10, 20, 30)).into()
    }

    fn tine() -> Tool<u16> {
        TineLine::new(DVec2::new(1.0, 2.0), DVec2::new(0.0, 0.0), 12.0, 4.0).into()
    }

    #[test]
    fn names() {
        assert_eq!(drop().name(), "ink-drop");
        assert_eq!(tine().name(), "tine-line");
    }

    #[test]
    fn serializes_with_tool_tag() {
        let v = serde_json::to_value(drop()).unwrap();
        assert_eq!(v["tool"], "ink_drop");
        assert_eq!(v["center"], serde_json::json!([4.0, 5.0]));
        assert_eq!(v["radius"], 3.0);
        assert_eq!(v["color"], serde_json::json!([10, 20, 30]));

        let v = serde_json::to_value(tine()).unwrap();
        assert_eq!(v["tool"], "tine_line");
        assert_eq!(v["sharpness"], 4.0);
    }

    #[test]
    fn json_round_trip_preserves_sequence() {
        let tools = vec![drop(), tine(), drop()];
        let json = serde_json::to_string(&tools).unwrap();
        let restored: Vec<Tool<u16>> = serde_json::from_str(&json).unwrap();
        assert_eq!(tools, restored);
    }

    #[test]
    fn as_warp_validates_underlying_tool() {
        let bad: Tool<u16> = TineLine::new(DVec2::ZERO, DVec2::ZERO, 1.0, 1.0).into();
        assert!(bad.as_warp().validate().is_err());
        assert!(tine().as_warp().validate().is_ok());
    }
}
