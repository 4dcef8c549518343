//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`bookings`] - 预订接口 (创建 + 查询)
//! - [`search`] - 房源搜索接口
//! - [`properties`] - 房源录入与读取接口
//! - [`media`] - 签名媒体下载接口

pub mod bookings;
pub mod health;
pub mod media;
pub mod properties;
pub mod search;
