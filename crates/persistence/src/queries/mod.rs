// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries for the persistence layer.

pub mod karats;

pub use karats::{code_in_use, find_karat, query_karats};
