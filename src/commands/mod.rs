// Copyright (c) 2025 Centavo Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod profile;
pub mod config;
pub mod categories;
pub mod transactions;
pub mod goals;
pub mod networth;
pub mod reports;
pub mod streak;
pub mod badges;
pub mod assistant;
pub mod admin;
pub mod exporter;
pub mod doctor;
