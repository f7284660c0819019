// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 邮件模板渲染模块
pub mod minijinja_renderer;
