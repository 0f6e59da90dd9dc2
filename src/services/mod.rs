// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

pub mod backend;
pub mod direct;
pub mod dispatcher;
pub mod service;
