//! Codegen - スキーマコンパイラ
//!
//! service 定義から、定数・サーバー契約（trait）・ルーター構築関数を生成します。
//!
//! # 構成
//! - **names**: 識別子の変換とキーワード回避
//! - **signature**: ストリーミング形状 → trait メンバーのシグネチャ
//! - **printer**: インデント付きの出力バッファ
//! - **compiler**: 1 ファイル分の生成
//! - **protoc**: `prost_types` の descriptor からの変換
//! - **plugin**: protoc プラグインとしての 1 回の実行

pub mod compiler;
pub mod names;
pub mod plugin;
pub mod printer;
pub mod protoc;
pub mod signature;

pub use self::compiler::{GeneratedFile, compile_file};
pub use self::plugin::{DEFAULT_PACKAGE_SUFFIX, PluginOptions, generate};
pub use self::signature::ServerSignature;
