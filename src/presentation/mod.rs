// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 表示层模块
///
/// 只读的流水线状态查询与退订入口
pub mod errors;
pub mod handlers;
pub mod routes;
pub mod state;
