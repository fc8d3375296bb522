//! Visier-Elemente und ihre Wertetypen.
//!
//! Jeder Elementtyp des Visiers ist eine Variante von [`Element`]; der Writer
//! wählt die Serialisierung per Pattern-Match.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::calibration::Ammo;

/// Geschlossene Menge aller Elementtypen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementType {
    CentralVertLine,
    CentralHorzLine,
    Rangefinder,
    HorzRangeIndicators,
    BallisticRangeIndicators,
    ShellBallisticsBlock,
    CustomLine,
    CustomText,
    CustomCircle,
    CustomQuad,
}

impl ElementType {
    /// Typen, von denen ein Visier genau eine Instanz besitzen muss.
    pub const SINGLETONS: [ElementType; 4] = [
        ElementType::CentralVertLine,
        ElementType::CentralHorzLine,
        ElementType::Rangefinder,
        ElementType::HorzRangeIndicators,
    ];
}

/// RGBA-Farbe mit Kanälen als Anteil 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Kanäle als 0–255, jeweils `round(clamp01(c) * 255)`.
    pub fn to_bytes(self) -> [u8; 4] {
        [
            channel_to_byte(self.r),
            channel_to_byte(self.g),
            channel_to_byte(self.b),
            channel_to_byte(self.a),
        ]
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }
}

/// Rundet kaufmännisch (0.5 → aufwärts), NaN wird zu 0.
fn channel_to_byte(fraction: f64) -> u8 {
    if fraction.is_nan() {
        return 0;
    }
    (fraction.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Skalierungsmodus einer Entfernungsskala.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScaleMode {
    #[default]
    Vertical,
    Radial,
}

/// Textausrichtung; `id()` ist der Wert im Visier-Format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAlign {
    #[default]
    Center,
    Left,
    Right,
}

impl TextAlign {
    pub fn id(self) -> i64 {
        match self {
            TextAlign::Center => 0,
            TextAlign::Left => 1,
            TextAlign::Right => 2,
        }
    }
}

/// Parameter einer radialen Bewegung.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RadialMovement {
    pub angle: f64,
    pub radial_center: DVec2,
    pub speed: f64,
    /// Expliziter Drehpunkt; `None` bedeutet automatische Zentrierung
    pub center: Option<DVec2>,
}

/// Bewegungsart eines frei platzierten Elements.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Movement {
    #[default]
    Static,
    Move,
    MoveRadial(RadialMovement),
}

/// Teilstrich der horizontalen Entfernungsanzeige.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HorzIndicator {
    pub mil: i32,
    pub major: bool,
}

impl HorzIndicator {
    pub fn new(mil: i32, major: bool) -> Self {
        Self { mil, major }
    }

    /// Beschriftung: Betrag der Mil-Position bei Hauptstrichen, sonst 0.
    ///
    /// Vorzeichenlos, damit auch `i32::MIN` einen gültigen Betrag hat.
    pub fn label(&self) -> u32 {
        if self.major {
            self.mil.unsigned_abs()
        } else {
            0
        }
    }
}

/// Entfernungsmarke einer ballistischen Skala.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceIndicator {
    /// Entfernung in Metern
    pub distance: i32,
    pub major: bool,
    #[serde(default)]
    pub extend: f64,
    #[serde(default)]
    pub text_offset: DVec2,
}

impl DistanceIndicator {
    pub fn new(distance: i32, major: bool) -> Self {
        Self {
            distance,
            major,
            extend: 0.0,
            text_offset: DVec2::ZERO,
        }
    }

    /// Beschriftung in Hektometern: `|distance / 100|` mit Ganzzahldivision.
    ///
    /// Nebenmarken tragen die Beschriftung 0.
    pub fn label(&self) -> i32 {
        if self.major {
            (self.distance / 100).abs()
        } else {
            0
        }
    }
}

/// Schalter für die zentrale vertikale bzw. horizontale Linie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralLine {
    pub name: String,
    #[serde(default = "default_true")]
    pub draw: bool,
}

fn default_true() -> bool {
    true
}

/// Entfernungsmesser-Anzeige.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rangefinder {
    pub name: String,
    pub position: DVec2,
    /// Farbe des Fortschrittsbalkens (Start)
    pub color1: Rgba,
    /// Farbe des Fortschrittsbalkens (Ende)
    pub color2: Rgba,
    pub text_scale: f64,
    pub use_thousandth: bool,
}

impl Default for Rangefinder {
    fn default() -> Self {
        Self {
            name: "Rangefinder".into(),
            position: DVec2::ZERO,
            color1: Rgba::new(1.0, 1.0, 1.0, 1.0),
            color2: Rgba::new(1.0, 1.0, 1.0, 1.0),
            text_scale: 0.0,
            use_thousandth: false,
        }
    }
}

/// Horizontale Mil-Skala.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HorzRangeIndicators {
    pub name: String,
    pub size_major: f64,
    pub size_minor: f64,
    pub indicators: Vec<HorzIndicator>,
}

impl Default for HorzRangeIndicators {
    fn default() -> Self {
        Self {
            name: "Horz. Range Indicators".into(),
            size_major: 3.0,
            size_minor: 2.0,
            indicators: Vec::new(),
        }
    }
}

/// Gemeinsame Felder einer ballistischen Entfernungsskala.
///
/// Wird sowohl von [`BallisticRangeIndicators`] als auch von
/// [`ShellBlock`] verwendet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceScale {
    pub draw_upward: bool,
    pub position: DVec2,
    pub moving: bool,
    pub scale_mode: ScaleMode,
    pub circle_mode: bool,
    pub size_main: DVec2,
    pub text_pos: DVec2,
    pub text_align: TextAlign,
    pub text_shift: f64,
    pub draw_additional_lines: bool,
    pub size_additional: DVec2,
    pub radial_stretch: f64,
    pub radial_angle: f64,
    pub radial_radius: f64,
    pub radius_use_mils: bool,
    pub indicators: Vec<DistanceIndicator>,
}

impl Default for DistanceScale {
    fn default() -> Self {
        Self {
            draw_upward: false,
            position: DVec2::ZERO,
            moving: false,
            scale_mode: ScaleMode::Vertical,
            circle_mode: false,
            size_main: DVec2::new(0.0, 0.0),
            text_pos: DVec2::ZERO,
            text_align: TextAlign::Center,
            text_shift: 0.0,
            draw_additional_lines: false,
            size_additional: DVec2::ZERO,
            radial_stretch: 1.0,
            radial_angle: 0.0,
            radial_radius: 0.0,
            radius_use_mils: false,
            indicators: Vec::new(),
        }
    }
}

impl DistanceScale {
    pub fn is_radial(&self) -> bool {
        self.scale_mode == ScaleMode::Radial
    }
}

/// Ballistische Entfernungsskala der Hauptwaffe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallisticRangeIndicators {
    pub name: String,
    #[serde(default)]
    pub scale: DistanceScale,
    #[serde(default)]
    pub draw_correction_label: bool,
    #[serde(default)]
    pub correction_label_pos: DVec2,
}

/// Entfernungsskala für eine bestimmte Munition (`bullet`-Block).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellBlock {
    pub name: String,
    pub ammo: Ammo,
    #[serde(default = "default_trigger_group")]
    pub trigger_group: String,
    #[serde(default)]
    pub scale: DistanceScale,
}

fn default_trigger_group() -> String {
    "primary".into()
}

/// Freie Linie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomLine {
    pub name: String,
    #[serde(default)]
    pub use_thousandth: bool,
    #[serde(default)]
    pub movement: Movement,
    pub start: DVec2,
    pub end: DVec2,
}

/// Freier Text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomText {
    pub name: String,
    #[serde(default)]
    pub use_thousandth: bool,
    #[serde(default)]
    pub movement: Movement,
    pub text: String,
    #[serde(default)]
    pub align: TextAlign,
    #[serde(default)]
    pub size: f64,
    #[serde(default)]
    pub position: DVec2,
}

/// Freier Kreis bzw. Kreissegment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomCircle {
    pub name: String,
    #[serde(default)]
    pub use_thousandth: bool,
    #[serde(default)]
    pub movement: Movement,
    /// Start- und Endwinkel des Segments in Grad
    pub segment: DVec2,
    pub position: DVec2,
    pub diameter: f64,
    #[serde(default)]
    pub size: f64,
}

/// Freies Viereck, Ecken im Uhrzeigersinn ab oben links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomQuad {
    pub name: String,
    #[serde(default)]
    pub use_thousandth: bool,
    #[serde(default)]
    pub movement: Movement,
    pub top_left: DVec2,
    pub top_right: DVec2,
    pub bottom_right: DVec2,
    pub bottom_left: DVec2,
}

/// Ein Visier-Element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Element {
    CentralVertLine(CentralLine),
    CentralHorzLine(CentralLine),
    Rangefinder(Rangefinder),
    HorzRangeIndicators(HorzRangeIndicators),
    BallisticRangeIndicators(BallisticRangeIndicators),
    ShellBallisticsBlock(ShellBlock),
    CustomLine(CustomLine),
    CustomText(CustomText),
    CustomCircle(CustomCircle),
    CustomQuad(CustomQuad),
}

impl Element {
    pub fn element_type(&self) -> ElementType {
        match self {
            Element::CentralVertLine(_) => ElementType::CentralVertLine,
            Element::CentralHorzLine(_) => ElementType::CentralHorzLine,
            Element::Rangefinder(_) => ElementType::Rangefinder,
            Element::HorzRangeIndicators(_) => ElementType::HorzRangeIndicators,
            Element::BallisticRangeIndicators(_) => ElementType::BallisticRangeIndicators,
            Element::ShellBallisticsBlock(_) => ElementType::ShellBallisticsBlock,
            Element::CustomLine(_) => ElementType::CustomLine,
            Element::CustomText(_) => ElementType::CustomText,
            Element::CustomCircle(_) => ElementType::CustomCircle,
            Element::CustomQuad(_) => ElementType::CustomQuad,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Element::CentralVertLine(e) | Element::CentralHorzLine(e) => &e.name,
            Element::Rangefinder(e) => &e.name,
            Element::HorzRangeIndicators(e) => &e.name,
            Element::BallisticRangeIndicators(e) => &e.name,
            Element::ShellBallisticsBlock(e) => &e.name,
            Element::CustomLine(e) => &e.name,
            Element::CustomText(e) => &e.name,
            Element::CustomCircle(e) => &e.name,
            Element::CustomQuad(e) => &e.name,
        }
    }
}
