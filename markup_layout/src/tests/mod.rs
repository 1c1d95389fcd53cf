// Copyright 2025 the Markup Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod test_lines;
pub(crate) mod utils;
