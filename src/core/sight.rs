//! Visier-Modell mit typisierter Element-Registry.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::elements::{
    BallisticRangeIndicators, CentralLine, CustomCircle, CustomLine, CustomQuad, CustomText,
    Element, ElementType, HorzRangeIndicators, Rangefinder, ShellBlock,
};

/// Allgemeine Visier-Einstellungen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Tausendstel-Variante (`ussr`, `nato`, ...)
    pub thousandth: String,
    pub font_scale: f64,
    pub line_size: f64,
    pub apply_correction_to_gun: bool,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            thousandth: "ussr".into(),
            font_scale: 1.0,
            line_size: 1.0,
            apply_correction_to_gun: false,
        }
    }
}

/// Fehler beim Aufbau eines [`SightModel`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SightModelError {
    #[error("Pflicht-Element fehlt: {0:?}")]
    MissingElement(ElementType),
    #[error("Element darf nur einmal vorkommen: {0:?}")]
    DuplicateElement(ElementType),
}

/// Vollständiges Visier.
///
/// Die Pflicht-Elemente (zentrale Linien, Entfernungsmesser, horizontale
/// Skala) existieren genau einmal; das wird beim Aufbau geprüft, nicht
/// erst beim Export.
#[derive(Debug, Clone, PartialEq)]
pub struct SightModel {
    pub general: GeneralSettings,
    central_vert_line: CentralLine,
    central_horz_line: CentralLine,
    rangefinder: Rangefinder,
    horz_range: HorzRangeIndicators,
    ballistic_range: Option<BallisticRangeIndicators>,
    shell_blocks: Vec<ShellBlock>,
    lines: Vec<CustomLine>,
    texts: Vec<CustomText>,
    circles: Vec<CustomCircle>,
    quads: Vec<CustomQuad>,
}

impl SightModel {
    /// Baut ein Visier aus einer Elementliste.
    ///
    /// Die Reihenfolge innerhalb eines Typs bleibt erhalten.
    pub fn from_elements(
        general: GeneralSettings,
        elements: impl IntoIterator<Item = Element>,
    ) -> Result<Self, SightModelError> {
        let mut central_vert_line = None;
        let mut central_horz_line = None;
        let mut rangefinder = None;
        let mut horz_range = None;
        let mut ballistic_range = None;
        let mut shell_blocks = Vec::new();
        let mut lines = Vec::new();
        let mut texts = Vec::new();
        let mut circles = Vec::new();
        let mut quads = Vec::new();

        for element in elements {
            let kind = element.element_type();
            match element {
                Element::CentralVertLine(e) => put_once(&mut central_vert_line, e, kind)?,
                Element::CentralHorzLine(e) => put_once(&mut central_horz_line, e, kind)?,
                Element::Rangefinder(e) => put_once(&mut rangefinder, e, kind)?,
                Element::HorzRangeIndicators(e) => put_once(&mut horz_range, e, kind)?,
                Element::BallisticRangeIndicators(e) => put_once(&mut ballistic_range, e, kind)?,
                Element::ShellBallisticsBlock(e) => shell_blocks.push(e),
                Element::CustomLine(e) => lines.push(e),
                Element::CustomText(e) => texts.push(e),
                Element::CustomCircle(e) => circles.push(e),
                Element::CustomQuad(e) => quads.push(e),
            }
        }

        Ok(Self {
            general,
            central_vert_line: required(central_vert_line, ElementType::CentralVertLine)?,
            central_horz_line: required(central_horz_line, ElementType::CentralHorzLine)?,
            rangefinder: required(rangefinder, ElementType::Rangefinder)?,
            horz_range: required(horz_range, ElementType::HorzRangeIndicators)?,
            ballistic_range,
            shell_blocks,
            lines,
            texts,
            circles,
            quads,
        })
    }

    /// Visier mit Standard-Pflichtelementen und sonst leer.
    pub fn with_defaults(general: GeneralSettings) -> Self {
        Self {
            general,
            central_vert_line: CentralLine {
                name: "Central Vert. Line".into(),
                draw: true,
            },
            central_horz_line: CentralLine {
                name: "Central Horz. Line".into(),
                draw: true,
            },
            rangefinder: Rangefinder::default(),
            horz_range: HorzRangeIndicators::default(),
            ballistic_range: None,
            shell_blocks: Vec::new(),
            lines: Vec::new(),
            texts: Vec::new(),
            circles: Vec::new(),
            quads: Vec::new(),
        }
    }

    pub fn central_vert_line(&self) -> &CentralLine {
        &self.central_vert_line
    }

    pub fn central_horz_line(&self) -> &CentralLine {
        &self.central_horz_line
    }

    pub fn rangefinder(&self) -> &Rangefinder {
        &self.rangefinder
    }

    pub fn horz_range(&self) -> &HorzRangeIndicators {
        &self.horz_range
    }

    pub fn ballistic_range(&self) -> Option<&BallisticRangeIndicators> {
        self.ballistic_range.as_ref()
    }

    pub fn shell_blocks(&self) -> &[ShellBlock] {
        &self.shell_blocks
    }

    pub fn lines(&self) -> &[CustomLine] {
        &self.lines
    }

    pub fn texts(&self) -> &[CustomText] {
        &self.texts
    }

    pub fn circles(&self) -> &[CustomCircle] {
        &self.circles
    }

    pub fn quads(&self) -> &[CustomQuad] {
        &self.quads
    }

    /// Anzahl aller Elemente inkl. Pflicht-Elementen
    pub fn element_count(&self) -> usize {
        ElementType::SINGLETONS.len()
            + usize::from(self.ballistic_range.is_some())
            + self.shell_blocks.len()
            + self.lines.len()
            + self.texts.len()
            + self.circles.len()
            + self.quads.len()
    }

    /// Zerlegt das Visier wieder in eine flache Elementliste.
    #[cfg(test)]
    pub(crate) fn into_elements(self) -> (GeneralSettings, Vec<Element>) {
        let mut elements = vec![
            Element::CentralVertLine(self.central_vert_line),
            Element::CentralHorzLine(self.central_horz_line),
            Element::Rangefinder(self.rangefinder),
            Element::HorzRangeIndicators(self.horz_range),
        ];
        elements.extend(self.ballistic_range.map(Element::BallisticRangeIndicators));
        elements.extend(self.shell_blocks.into_iter().map(Element::ShellBallisticsBlock));
        elements.extend(self.lines.into_iter().map(Element::CustomLine));
        elements.extend(self.texts.into_iter().map(Element::CustomText));
        elements.extend(self.circles.into_iter().map(Element::CustomCircle));
        elements.extend(self.quads.into_iter().map(Element::CustomQuad));
        (self.general, elements)
    }

    pub fn set_ballistic_range(&mut self, ballistic: Option<BallisticRangeIndicators>) {
        self.ballistic_range = ballistic;
    }

    pub fn rangefinder_mut(&mut self) -> &mut Rangefinder {
        &mut self.rangefinder
    }

    pub fn horz_range_mut(&mut self) -> &mut HorzRangeIndicators {
        &mut self.horz_range
    }

    /// Hängt ein mehrfach erlaubtes Element an.
    ///
    /// Pflicht-Elemente und die ballistische Skala werden ersetzt statt
    /// angehängt.
    pub fn push_element(&mut self, element: Element) {
        match element {
            Element::CentralVertLine(e) => self.central_vert_line = e,
            Element::CentralHorzLine(e) => self.central_horz_line = e,
            Element::Rangefinder(e) => self.rangefinder = e,
            Element::HorzRangeIndicators(e) => self.horz_range = e,
            Element::BallisticRangeIndicators(e) => self.ballistic_range = Some(e),
            Element::ShellBallisticsBlock(e) => self.shell_blocks.push(e),
            Element::CustomLine(e) => self.lines.push(e),
            Element::CustomText(e) => self.texts.push(e),
            Element::CustomCircle(e) => self.circles.push(e),
            Element::CustomQuad(e) => self.quads.push(e),
        }
    }
}

fn put_once<T>(slot: &mut Option<T>, value: T, kind: ElementType) -> Result<(), SightModelError> {
    if slot.is_some() {
        return Err(SightModelError::DuplicateElement(kind));
    }
    *slot = Some(value);
    Ok(())
}

fn required<T>(slot: Option<T>, kind: ElementType) -> Result<T, SightModelError> {
    slot.ok_or(SightModelError::MissingElement(kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::elements::{CustomText, Movement, TextAlign};
    use glam::DVec2;

    fn mandatory() -> Vec<Element> {
        let (_, elements) = SightModel::with_defaults(GeneralSettings::default()).into_elements();
        elements
    }

    fn text(name: &str) -> Element {
        Element::CustomText(CustomText {
            name: name.into(),
            use_thousandth: false,
            movement: Movement::Static,
            text: name.into(),
            align: TextAlign::Left,
            size: 1.0,
            position: DVec2::ZERO,
        })
    }

    #[test]
    fn test_from_elements_requires_every_singleton() {
        for missing in ElementType::SINGLETONS {
            let elements: Vec<Element> = mandatory()
                .into_iter()
                .filter(|e| e.element_type() != missing)
                .collect();
            let err = SightModel::from_elements(GeneralSettings::default(), elements)
                .expect_err("Fehlendes Pflicht-Element muss abgelehnt werden");
            assert_eq!(err, SightModelError::MissingElement(missing));
        }
    }

    #[test]
    fn test_from_elements_rejects_second_rangefinder() {
        let mut elements = mandatory();
        elements.push(Element::Rangefinder(Rangefinder::default()));

        let err = SightModel::from_elements(GeneralSettings::default(), elements)
            .expect_err("Doppelter Entfernungsmesser muss abgelehnt werden");
        assert_eq!(err, SightModelError::DuplicateElement(ElementType::Rangefinder));
    }

    #[test]
    fn test_from_elements_keeps_order_within_type() {
        let mut elements = vec![text("first")];
        elements.extend(mandatory());
        elements.push(text("second"));

        let sight = SightModel::from_elements(GeneralSettings::default(), elements)
            .expect("Visier erwartet");
        let names: Vec<&str> = sight.texts().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(sight.element_count(), 6);
        assert!(sight.ballistic_range().is_none());
    }

    #[test]
    fn test_into_elements_roundtrip() {
        let mut sight = SightModel::with_defaults(GeneralSettings::default());
        sight.push_element(text("label"));
        let expected = sight.clone();

        let (general, elements) = sight.into_elements();
        let rebuilt = SightModel::from_elements(general, elements).expect("Visier erwartet");
        assert_eq!(rebuilt, expected);
    }
}
