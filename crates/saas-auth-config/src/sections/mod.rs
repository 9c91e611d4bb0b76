// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections.

mod authz;
mod logging;

pub use authz::{AuthzConfig, AuthzConfigLayer};
pub use logging::{LogFormat, LoggingConfig, LoggingConfigLayer};
