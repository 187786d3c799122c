// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.

pub mod karats;

pub use karats::{delete_karats, insert_karat, set_karat_deleted, set_karats_status, update_karat};
