// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 订阅源读取模块
///
/// 通过HTTP获取RSS/Atom订阅源并解析为领域条目
pub mod http_feed_reader;
