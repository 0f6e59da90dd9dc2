// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

pub mod command;
pub mod process;
pub mod relay;
pub mod service_manager;
