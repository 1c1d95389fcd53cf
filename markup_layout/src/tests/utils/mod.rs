// Copyright 2025 the Markup Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod env;
mod renderer;

pub(crate) use env::{MonoSource, TestEnv};
pub(crate) use renderer::{Event, Recorder};
