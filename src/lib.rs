//! 図書館バックエンド
//!
//! 著者・書籍・借り手の登録と、書籍の貸出可否と借り手のリストを
//! 食い違わせない貸出・返却のワークフロー。

pub mod adapters;
pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
