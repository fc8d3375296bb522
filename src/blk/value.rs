//! Typisierte Werte des Visier-Formats (`key:tag = value`).

use glam::DVec2;

use crate::core::Rgba;

/// Zahl innerhalb eines Tupels (`p2`/`p3`/`p4`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Num {
    Int(i64),
    Real(f64),
}

impl Num {
    fn render(self) -> String {
        match self {
            Num::Int(v) => v.to_string(),
            Num::Real(v) => format_real(v),
        }
    }
}

impl From<i32> for Num {
    fn from(value: i32) -> Self {
        Num::Int(i64::from(value))
    }
}

impl From<u32> for Num {
    fn from(value: u32) -> Self {
        Num::Int(i64::from(value))
    }
}

impl From<i64> for Num {
    fn from(value: i64) -> Self {
        Num::Int(value)
    }
}

impl From<f64> for Num {
    fn from(value: f64) -> Self {
        Num::Real(value)
    }
}

/// Ein Skalarwert samt Typ-Tag.
#[derive(Debug, Clone, PartialEq)]
pub enum BlkValue {
    /// `t`: Zeichenkette in Anführungszeichen.
    ///
    /// Der Inhalt wird unverändert übernommen; `"` oder Zeilenumbrüche im
    /// Text ergeben eine Zeile, die das Spiel nicht lesen kann.
    Text(String),
    /// `r`
    Real(f64),
    /// `b`: `yes`/`no`
    Bool(bool),
    /// `i`
    Int(i64),
    /// `c`: vier Kanäle 0–255
    Color(Rgba),
    /// `p2`/`p3`/`p4`
    Tuple(Vec<Num>),
    /// `p4` aus zwei Punkten, geschrieben als `x1,y1, x2,y2`
    Segment(DVec2, DVec2),
}

impl BlkValue {
    pub fn text(value: impl Into<String>) -> Self {
        BlkValue::Text(value.into())
    }

    pub fn point(p: DVec2) -> Self {
        BlkValue::Tuple(vec![Num::Real(p.x), Num::Real(p.y)])
    }

    pub fn pair(a: impl Into<Num>, b: impl Into<Num>) -> Self {
        BlkValue::Tuple(vec![a.into(), b.into()])
    }

    pub fn triple(a: impl Into<Num>, b: impl Into<Num>, c: impl Into<Num>) -> Self {
        BlkValue::Tuple(vec![a.into(), b.into(), c.into()])
    }

    /// Typ-Tag wie er hinter dem Doppelpunkt steht.
    pub fn tag(&self) -> &'static str {
        match self {
            BlkValue::Text(_) => "t",
            BlkValue::Real(_) => "r",
            BlkValue::Bool(_) => "b",
            BlkValue::Int(_) => "i",
            BlkValue::Color(_) => "c",
            BlkValue::Tuple(values) => match values.len() {
                2 => "p2",
                3 => "p3",
                _ => "p4",
            },
            BlkValue::Segment(..) => "p4",
        }
    }

    pub fn render(&self) -> String {
        match self {
            BlkValue::Text(s) => format!("\"{}\"", s),
            BlkValue::Real(v) => format_real(*v),
            BlkValue::Bool(v) => yes_no(*v).to_string(),
            BlkValue::Int(v) => v.to_string(),
            BlkValue::Color(c) => {
                let [r, g, b, a] = c.to_bytes();
                format!("{},{},{},{}", r, g, b, a)
            }
            BlkValue::Tuple(values) => values
                .iter()
                .map(|v| v.render())
                .collect::<Vec<String>>()
                .join(","),
            BlkValue::Segment(start, end) => format!(
                "{},{}, {},{}",
                format_real(start.x),
                format_real(start.y),
                format_real(end.x),
                format_real(end.y)
            ),
        }
    }
}

impl From<bool> for BlkValue {
    fn from(value: bool) -> Self {
        BlkValue::Bool(value)
    }
}

impl From<f64> for BlkValue {
    fn from(value: f64) -> Self {
        BlkValue::Real(value)
    }
}

impl From<i64> for BlkValue {
    fn from(value: i64) -> Self {
        BlkValue::Int(value)
    }
}

impl From<Rgba> for BlkValue {
    fn from(value: Rgba) -> Self {
        BlkValue::Color(value)
    }
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Dezimaldarstellung einer Gleitkommazahl.
///
/// Ganzzahlige Werte behalten ein `.0` (`3.0`), alle anderen werden in
/// kürzester eindeutiger Form geschrieben (`0.1`, `-0.25`).
pub fn format_real(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
