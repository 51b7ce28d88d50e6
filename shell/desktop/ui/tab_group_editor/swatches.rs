/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::model::tab_group::TabGroupColor;

/// Radio group name shared by every swatch input.
pub const SWATCH_GROUP_NAME: &str = "tab-group-color";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSwatch {
    pub color: TabGroupColor,
    pub checked: bool,
}

/// Single-select color picker over the fixed palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorSwatches {
    swatches: Vec<ColorSwatch>,
}

impl ColorSwatches {
    pub fn new() -> Self {
        let mut swatches = Self {
            swatches: Vec::with_capacity(TabGroupColor::ALL.len()),
        };
        swatches.populate();
        swatches
    }

    /// Rebuild one unchecked swatch per palette color.
    pub fn populate(&mut self) {
        self.swatches.clear();
        self.swatches
            .extend(TabGroupColor::ALL.into_iter().map(|color| ColorSwatch {
                color,
                checked: false,
            }));
    }

    /// Check the swatch matching `color`, uncheck the rest. `None` unchecks all.
    pub fn check(&mut self, color: Option<TabGroupColor>) {
        for swatch in &mut self.swatches {
            swatch.checked = Some(swatch.color) == color;
        }
    }

    pub fn checked(&self) -> Option<TabGroupColor> {
        self.swatches
            .iter()
            .find(|swatch| swatch.checked)
            .map(|swatch| swatch.color)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColorSwatch> {
        self.swatches.iter()
    }
}

impl Default for ColorSwatches {
    fn default() -> Self {
        Self::new()
    }
}
