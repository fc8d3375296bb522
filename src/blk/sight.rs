//! Writer für Visier-Dateien im Block-Format.
//!
//! Die Reihenfolge der Abschnitte ist fest: Kopf, Allgemein,
//! Entfernungsmesser, horizontale Skala, ballistische Skala, Munitions-Blöcke,
//! Linien, Texte, Kreise, Vierecke. Optionale Felder werden nur geschrieben,
//! wenn ihr Schalter gesetzt ist bzw. der Modus passt; fehlende Felder
//! übernimmt das Spiel mit seinem Standardwert.

use super::value::BlkValue;
use super::writer::BlkWriter;
use crate::core::{
    BallisticRangeIndicators, CalibrationModel, CustomCircle, CustomLine, CustomQuad, CustomText,
    DistanceIndicator, DistanceScale, Movement, SightModel,
};
use crate::shared::BuildInfo;

/// Ob `move:b` nur bei aktivem Schalter oder immer geschrieben wird.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MoveFlag {
    IfSet,
    Always,
}

/// Erzeugt den vollständigen Inhalt einer Visier-Datei.
///
/// # Parameter
/// - `sight`: Das zu exportierende Visier
/// - `calibration`: Optionale Kalibrierung, nur für den Fahrzeugnamen im Kopf
/// - `build`: Name und Build-Kennung für den Kopfkommentar
pub fn write_sight_config(
    sight: &SightModel,
    calibration: Option<&CalibrationModel>,
    build: &BuildInfo,
) -> String {
    sight_writer(sight, calibration, build).finish()
}

/// Wie [`write_sight_config`], aber als einzelne Zeilen.
pub fn sight_config_lines(
    sight: &SightModel,
    calibration: Option<&CalibrationModel>,
    build: &BuildInfo,
) -> Vec<String> {
    sight_writer(sight, calibration, build).into_lines()
}

fn sight_writer(
    sight: &SightModel,
    calibration: Option<&CalibrationModel>,
    build: &BuildInfo,
) -> BlkWriter {
    let mut w = BlkWriter::new();

    let vehicle = calibration.map_or("unknown", |c| c.vehicle.name.as_str());
    w.comment(&format!("created with {}", build.label()));
    w.comment(&format!("vehicle = {}", vehicle));
    w.blank();

    write_general(&mut w, sight);
    write_rangefinder(&mut w, sight);
    write_horz_ranges(&mut w, sight);

    if let Some(ballistic) = sight.ballistic_range() {
        write_ballistic_range(&mut w, ballistic);
    }

    write_shell_blocks(&mut w, sight);
    write_shapes(&mut w, sight);

    log::debug!(
        "Visier serialisiert: {} Elemente, {} Zeilen",
        sight.element_count(),
        w.lines().len()
    );
    w
}

fn write_general(w: &mut BlkWriter, sight: &SightModel) {
    let general = &sight.general;
    w.comment("general");
    w.scalar("thousandth", BlkValue::text(general.thousandth.as_str()));
    w.scalar("fontSizeMult", general.font_scale);
    w.scalar("lineSizeMult", general.line_size);
    w.scalar("applyCorrectionToGun", general.apply_correction_to_gun);
    w.scalar("drawCentralLineVert", sight.central_vert_line().draw);
    w.scalar("drawCentralLineHorz", sight.central_horz_line().draw);
    w.blank();
}

fn write_rangefinder(w: &mut BlkWriter, sight: &SightModel) {
    let rangefinder = sight.rangefinder();
    w.comment("rangefinder");
    w.scalar("rangefinderHorizontalOffset", rangefinder.position.x);
    w.scalar("rangefinderVerticalOffset", rangefinder.position.y);
    w.scalar("rangefinderProgressBarColor1", rangefinder.color1);
    w.scalar("rangefinderProgressBarColor2", rangefinder.color2);
    w.scalar("rangefinderTextScale", rangefinder.text_scale);
    w.scalar("rangefinderUseThousandth", rangefinder.use_thousandth);
    w.blank();
}

fn write_horz_ranges(w: &mut BlkWriter, sight: &SightModel) {
    let horz = sight.horz_range();
    w.comment("horizontal range indicators");
    w.scalar(
        "crosshairHorVertSize",
        BlkValue::pair(horz.size_major, horz.size_minor),
    );
    w.block("crosshair_hor_ranges", |w| {
        for indicator in &horz.indicators {
            w.scalar("range", BlkValue::pair(indicator.mil, indicator.label()));
        }
    });
    w.blank();
}

fn write_ballistic_range(w: &mut BlkWriter, ballistic: &BallisticRangeIndicators) {
    w.comment("ballistic range indicators");
    write_scale_fields(w, &ballistic.scale, MoveFlag::IfSet);
    w.scalar("drawDistanceCorrection", ballistic.draw_correction_label);
    if ballistic.draw_correction_label {
        w.scalar(
            "distanceCorrectionPos",
            BlkValue::point(ballistic.correction_label_pos),
        );
    }
    w.blank();
    write_crosshair_distances(w, &ballistic.scale.indicators);
    w.blank();
}

fn write_shell_blocks(w: &mut BlkWriter, sight: &SightModel) {
    let blocks = sight.shell_blocks();
    if blocks.is_empty() {
        return;
    }

    w.comment("shell ballistics blocks");
    w.block("ballistics", |w| {
        for block in blocks {
            w.marker(&format!("{} ({})", block.name, block.ammo.name));
            w.block("bullet", |w| {
                w.scalar("bulletType", BlkValue::text(block.ammo.ammo_type.as_str()));
                w.scalar("speed", block.ammo.speed);
                w.scalar("triggerGroup", BlkValue::text(block.trigger_group.as_str()));
                w.scalar("thousandth", false);
                write_scale_fields(w, &block.scale, MoveFlag::Always);
                write_crosshair_distances(w, &block.scale.indicators);
            });
        }
    });
    w.blank();
}

/// Skalarfelder einer Entfernungsskala (ohne die Marken selbst).
fn write_scale_fields(w: &mut BlkWriter, scale: &DistanceScale, move_flag: MoveFlag) {
    w.scalar("drawUpward", scale.draw_upward);
    w.scalar("distancePos", BlkValue::point(scale.position));
    if scale.moving || move_flag == MoveFlag::Always {
        w.scalar("move", scale.moving);
    }
    if scale.is_radial() {
        w.scalar("radial", true);
    }
    if scale.circle_mode {
        w.scalar("circleMode", true);
    }
    w.scalar("crosshairDistHorSizeMain", BlkValue::point(scale.size_main));
    w.scalar("textPos", BlkValue::point(scale.text_pos));
    w.scalar("textAlign", scale.text_align.id());
    w.scalar("textShift", scale.text_shift);
    w.scalar("drawAdditionalLines", scale.draw_additional_lines);
    w.scalar(
        "crosshairDistHorSizeAdditional",
        BlkValue::point(scale.size_additional),
    );
    if scale.is_radial() {
        w.scalar("radialStretch", scale.radial_stretch);
        w.scalar("radialAngle", scale.radial_angle);
        w.scalar(
            "radialRadius",
            BlkValue::pair(scale.radial_radius, i32::from(scale.radius_use_mils)),
        );
    }
}

/// Die `distance`-Zeilen stehen eine Ebene tiefer als der Block selbst,
/// wie in den Dateien, die das Spiel-Werkzeug schreibt.
fn write_crosshair_distances(w: &mut BlkWriter, indicators: &[DistanceIndicator]) {
    w.block("crosshair_distances", |w| {
        w.indented(|w| {
            for indicator in indicators {
                w.inline_block(
                    "distance",
                    &[
                        (
                            "distance",
                            BlkValue::triple(
                                indicator.distance,
                                indicator.label(),
                                indicator.extend,
                            ),
                        ),
                        ("textPos", BlkValue::point(indicator.text_offset)),
                    ],
                );
            }
        });
    });
}

/// Bewegungsfelder, gemeinsam für alle freien Formen.
fn write_movement(w: &mut BlkWriter, movement: &Movement) {
    match movement {
        Movement::Static => {}
        Movement::Move => w.scalar("move", true),
        Movement::MoveRadial(radial) => {
            w.scalar("moveRadial", true);
            w.scalar("radialAngle", radial.angle);
            w.scalar("radialCenter", BlkValue::point(radial.radial_center));
            w.scalar("radialMoveSpeed", radial.speed);
            if let Some(center) = radial.center {
                w.scalar("center", BlkValue::point(center));
            }
        }
    }
}

fn write_shapes(w: &mut BlkWriter, sight: &SightModel) {
    write_shape_container(w, "lines", "drawLines", sight.lines(), write_line);
    write_shape_container(w, "text", "drawTexts", sight.texts(), write_text);
    write_shape_container(w, "circles", "drawCircles", sight.circles(), write_circle);
    write_shape_container(w, "quads", "drawQuads", sight.quads(), write_quad);
}

fn write_shape_container<T>(
    w: &mut BlkWriter,
    comment: &str,
    container: &str,
    shapes: &[T],
    write_shape: fn(&mut BlkWriter, &T),
) {
    if shapes.is_empty() {
        return;
    }
    w.comment(comment);
    w.block(container, |w| {
        for shape in shapes {
            write_shape(w, shape);
        }
    });
}

fn write_line(w: &mut BlkWriter, line: &CustomLine) {
    w.marker(&line.name);
    w.block("line", |w| {
        w.scalar("thousandth", line.use_thousandth);
        write_movement(w, &line.movement);
        w.scalar("line", BlkValue::Segment(line.start, line.end));
    });
}

fn write_text(w: &mut BlkWriter, text: &CustomText) {
    w.marker(&text.name);
    w.block("text", |w| {
        w.scalar("text", BlkValue::text(text.text.as_str()));
        w.scalar("thousandth", text.use_thousandth);
        write_movement(w, &text.movement);
        w.scalar("pos", BlkValue::point(text.position));
        w.scalar("align", text.align.id());
        w.scalar("size", text.size);
    });
}

fn write_circle(w: &mut BlkWriter, circle: &CustomCircle) {
    w.marker(&circle.name);
    w.block("circle", |w| {
        w.scalar("thousandth", circle.use_thousandth);
        write_movement(w, &circle.movement);
        w.scalar("segment", BlkValue::point(circle.segment));
        w.scalar("pos", BlkValue::point(circle.position));
        w.scalar("diameter", circle.diameter);
        w.scalar("size", circle.size);
    });
}

fn write_quad(w: &mut BlkWriter, quad: &CustomQuad) {
    w.marker(&quad.name);
    w.block("quad", |w| {
        w.scalar("thousandth", quad.use_thousandth);
        write_movement(w, &quad.movement);
        w.scalar("tl", BlkValue::point(quad.top_left));
        w.scalar("tr", BlkValue::point(quad.top_right));
        w.scalar("br", BlkValue::point(quad.bottom_right));
        w.scalar("bl", BlkValue::point(quad.bottom_left));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        Ammo, DistanceIndicator, GeneralSettings, HorzIndicator, RadialMovement, ScaleMode,
        ShellBlock,
    };
    use crate::core::Element;
    use glam::DVec2;

    fn build() -> BuildInfo {
        BuildInfo::new("WTSightEdit", "test")
    }

    fn lines_of(sight: &SightModel) -> Vec<String> {
        sight_config_lines(sight, None, &build())
    }

    fn line_with_movement(movement: Movement) -> SightModel {
        let mut sight = SightModel::with_defaults(GeneralSettings::default());
        sight.push_element(Element::CustomLine(CustomLine {
            name: "bar".into(),
            use_thousandth: true,
            movement,
            start: DVec2::new(0.0, 0.0),
            end: DVec2::new(1.0, 1.0),
        }));
        sight
    }

    fn has_key(lines: &[String], key: &str) -> bool {
        lines.iter().any(|l| l.trim_start().starts_with(&format!("{}:", key)))
    }

    #[test]
    fn test_static_movement_emits_no_move_keys() {
        let lines = lines_of(&line_with_movement(Movement::Static));
        assert!(!has_key(&lines, "move"));
        assert!(!has_key(&lines, "moveRadial"));
    }

    #[test]
    fn test_move_emits_only_move_flag() {
        let lines = lines_of(&line_with_movement(Movement::Move));
        assert!(lines.contains(&"    move:b = yes".to_string()));
        assert!(!has_key(&lines, "moveRadial"));
        assert!(!has_key(&lines, "radialAngle"));
    }

    #[test]
    fn test_radial_movement_center_only_without_auto_center() {
        let radial = RadialMovement {
            angle: 30.0,
            radial_center: DVec2::new(0.5, -0.5),
            speed: 2.0,
            center: None,
        };
        let auto = lines_of(&line_with_movement(Movement::MoveRadial(radial)));
        assert!(auto.contains(&"    moveRadial:b = yes".to_string()));
        assert!(auto.contains(&"    radialAngle:r = 30.0".to_string()));
        assert!(auto.contains(&"    radialCenter:p2 = 0.5,-0.5".to_string()));
        assert!(auto.contains(&"    radialMoveSpeed:r = 2.0".to_string()));
        assert!(!has_key(&auto, "center"));
        assert!(!has_key(&auto, "move"));

        let fixed = RadialMovement {
            center: Some(DVec2::new(0.25, 0.0)),
            ..radial
        };
        let lines = lines_of(&line_with_movement(Movement::MoveRadial(fixed)));
        assert!(lines.contains(&"    center:p2 = 0.25,0.0".to_string()));
    }

    #[test]
    fn test_shell_block_thousandth_is_always_no() {
        let mut sight = SightModel::with_defaults(GeneralSettings::default());
        sight.general.thousandth = "nato".into();
        sight.rangefinder_mut().use_thousandth = true;
        sight.push_element(Element::ShellBallisticsBlock(ShellBlock {
            name: "HE".into(),
            ammo: Ammo {
                name: "75mm_he".into(),
                ammo_type: "he_frag_tank".into(),
                speed: 463.0,
            },
            trigger_group: "primary".into(),
            scale: DistanceScale::default(),
        }));

        let lines = lines_of(&sight);
        assert!(lines.contains(&"    thousandth:b = no".to_string()));
        assert!(lines.contains(&"  //-- HE (75mm_he)".to_string()));
        assert!(lines.contains(&"    move:b = no".to_string()));
    }

    #[test]
    fn test_ballistic_radial_fields_only_in_radial_mode() {
        let mut scale = DistanceScale {
            radial_radius: 12.0,
            radius_use_mils: true,
            indicators: vec![DistanceIndicator::new(-650, true)],
            ..DistanceScale::default()
        };
        let mut sight = SightModel::with_defaults(GeneralSettings::default());
        sight.set_ballistic_range(Some(BallisticRangeIndicators {
            name: "Ballistic".into(),
            scale: scale.clone(),
            draw_correction_label: false,
            correction_label_pos: DVec2::ZERO,
        }));

        let vertical = lines_of(&sight);
        assert!(!has_key(&vertical, "radial"));
        assert!(!has_key(&vertical, "radialRadius"));
        assert!(!has_key(&vertical, "move"));
        assert!(!has_key(&vertical, "distanceCorrectionPos"));
        assert!(vertical.contains(&"drawDistanceCorrection:b = no".to_string()));
        assert!(vertical
            .contains(&"    distance { distance:p3=-650,6,0.0; textPos:p2=0.0,0.0; }".to_string()));

        scale.scale_mode = ScaleMode::Radial;
        scale.moving = true;
        sight.set_ballistic_range(Some(BallisticRangeIndicators {
            name: "Ballistic".into(),
            scale,
            draw_correction_label: true,
            correction_label_pos: DVec2::new(0.1, 0.2),
        }));
        let radial = lines_of(&sight);
        assert!(radial.contains(&"radial:b = yes".to_string()));
        assert!(radial.contains(&"move:b = yes".to_string()));
        assert!(radial.contains(&"radialRadius:p2 = 12.0,1".to_string()));
        assert!(radial.contains(&"radialStretch:r = 1.0".to_string()));
        assert!(radial.contains(&"radialAngle:r = 0.0".to_string()));
        assert!(radial.contains(&"distanceCorrectionPos:p2 = 0.1,0.2".to_string()));
    }

    #[test]
    fn test_radial_shell_block_uses_full_scale_grammar() {
        let mut sight = SightModel::with_defaults(GeneralSettings::default());
        sight.push_element(Element::ShellBallisticsBlock(ShellBlock {
            name: "APHE".into(),
            ammo: Ammo {
                name: "76mm_br350a".into(),
                ammo_type: "aphe_tank".into(),
                speed: 662.0,
            },
            trigger_group: "primary".into(),
            scale: DistanceScale {
                scale_mode: ScaleMode::Radial,
                circle_mode: true,
                radial_stretch: 1.5,
                radial_angle: 45.0,
                radial_radius: 8.0,
                radius_use_mils: false,
                indicators: vec![DistanceIndicator::new(800, true)],
                ..DistanceScale::default()
            },
        }));

        let lines = lines_of(&sight);
        for expected in [
            "    move:b = no",
            "    radial:b = yes",
            "    circleMode:b = yes",
            "    radialStretch:r = 1.5",
            "    radialAngle:r = 45.0",
            "    radialRadius:p2 = 8.0,0",
            "    crosshair_distances {",
            "        distance { distance:p3=800,8,0.0; textPos:p2=0.0,0.0; }",
            "    }",
        ] {
            assert!(
                lines.contains(&expected.to_string()),
                "Zeile fehlt: {}",
                expected
            );
        }
    }

    #[test]
    fn test_horz_range_with_min_mil() {
        let mut sight = SightModel::with_defaults(GeneralSettings::default());
        sight.horz_range_mut().indicators = vec![HorzIndicator::new(i32::MIN, true)];

        let lines = lines_of(&sight);
        assert!(lines.contains(&"  range:p2 = -2147483648,2147483648".to_string()));
    }
}
