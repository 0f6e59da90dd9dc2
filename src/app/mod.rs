// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

pub mod config;
pub mod locale;
pub mod logging;
pub mod panel;
pub mod theme;
