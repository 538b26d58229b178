// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-specific connection setup.
//!
//! Only `SQLite` needs any: connection initialization, migrations and
//! PRAGMA configuration live here. Queries and mutations use the Diesel
//! DSL in `crate::sqlite`.

pub mod sqlite;
