// Copyright 2024 Popo Utility Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Runtime value model: values, types and operator semantics

pub mod arithmetic;
pub mod complex;
pub mod types;
pub mod value;

pub use arithmetic::{ArithmeticError, ArithmeticResult};
pub use complex::Complex;
pub use types::TypeInfo;
pub use value::Value;
