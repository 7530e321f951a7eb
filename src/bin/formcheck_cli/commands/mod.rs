// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for formcheck-cli
// ABOUTME: Provides access to the analysis and sport detection commands

pub mod analyze;
pub mod detect;
