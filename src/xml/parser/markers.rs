//! Marker-Parsing: Punkte und positionsbasierte `marker_N`-Attribute.

use anyhow::{bail, Context, Result};
use glam::IVec2;
use std::collections::HashMap;

const MARKER_PREFIX: &str = "marker_";

/// Parst einen Punkt im Format `"x,y"` bzw. `"x, y"`.
pub(super) fn parse_point(text: &str) -> Result<IVec2> {
    let mut parts = text.split(',').map(str::trim);
    let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
        bail!("Punkt '{}' hat nicht genau zwei Komponenten", text);
    };
    let x = x
        .parse::<i32>()
        .with_context(|| format!("X-Wert '{}' ist keine Ganzzahl", x))?;
    let y = y
        .parse::<i32>()
        .with_context(|| format!("Y-Wert '{}' ist keine Ganzzahl", y))?;
    Ok(IVec2::new(x, y))
}

/// Sammelt alle `marker_N`-Attribute, sortiert nach `N`.
///
/// Die Indizes müssen lückenlos bei 0 beginnen.
pub(super) fn parse_marker_ranges(attrs: &HashMap<String, String>) -> Result<Vec<IVec2>> {
    let mut indexed = Vec::with_capacity(attrs.len());
    for (key, value) in attrs {
        let Some(index) = key.strip_prefix(MARKER_PREFIX) else {
            continue;
        };
        let index = index
            .parse::<usize>()
            .with_context(|| format!("Ungueltiger Marker-Index in '{}'", key))?;
        indexed.push((index, parse_point(value)?));
    }
    indexed.sort_unstable_by_key(|(index, _)| *index);

    for (expected, (index, _)) in indexed.iter().enumerate() {
        if *index != expected {
            bail!("Marker-Index {} fehlt", expected);
        }
    }
    Ok(indexed.into_iter().map(|(_, point)| point).collect())
}
