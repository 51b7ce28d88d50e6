/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Tab group data model.
//!
//! Groups and tabs are owned by the tab strip. Everything outside the strip
//! refers to them through [`TabGroupId`] / [`TabId`] handles and reads them
//! back through `TabGroupStore`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable tab group handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TabGroupId(Uuid);

impl TabGroupId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TabGroupId {
    fn default() -> Self {
        Self::new()
    }
}

/// Window-local tab handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TabId(u64);

impl TabId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn index(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub id: TabId,
    pub url: String,
    pub group: Option<TabGroupId>,
}

/// Fixed tab group palette, in picker order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabGroupColor {
    Blue,
    Purple,
    Cyan,
    Orange,
    Yellow,
    Pink,
    Green,
    Gray,
    Red,
}

impl TabGroupColor {
    pub const ALL: [TabGroupColor; 9] = [
        TabGroupColor::Blue,
        TabGroupColor::Purple,
        TabGroupColor::Cyan,
        TabGroupColor::Orange,
        TabGroupColor::Yellow,
        TabGroupColor::Pink,
        TabGroupColor::Green,
        TabGroupColor::Gray,
        TabGroupColor::Red,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TabGroupColor::Blue => "blue",
            TabGroupColor::Purple => "purple",
            TabGroupColor::Cyan => "cyan",
            TabGroupColor::Orange => "orange",
            TabGroupColor::Yellow => "yellow",
            TabGroupColor::Pink => "pink",
            TabGroupColor::Green => "green",
            TabGroupColor::Gray => "gray",
            TabGroupColor::Red => "red",
        }
    }
}

impl fmt::Display for TabGroupColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a swatch value names no palette entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTabGroupColorError(pub String);

impl fmt::Display for ParseTabGroupColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown tab group color: {:?}", self.0)
    }
}

impl std::error::Error for ParseTabGroupColorError {}

impl FromStr for TabGroupColor {
    type Err = ParseTabGroupColorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        TabGroupColor::ALL
            .into_iter()
            .find(|color| color.as_str() == value)
            .ok_or_else(|| ParseTabGroupColorError(value.to_string()))
    }
}

/// A named, colored, ordered cluster of tabs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabGroup {
    pub id: TabGroupId,
    pub label: String,
    pub color: TabGroupColor,
    pub tabs: Vec<TabId>,
}

impl TabGroup {
    pub fn new(color: TabGroupColor, tabs: Vec<TabId>) -> Self {
        Self {
            id: TabGroupId::new(),
            label: String::new(),
            color,
            tabs,
        }
    }

    pub fn last_tab(&self) -> Option<TabId> {
        self.tabs.last().copied()
    }
}
