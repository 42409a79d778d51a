//! protoc plugin pipeline
//!
//! `CodeGeneratorRequest` → `CodeGeneratorResponse` の純粋関数です。
//! 実行間で状態は持ちません。設定エラーはレスポンスの `error` に入れ、
//! ファイルは 1 つも返しません。

use prost_types::compiler::code_generator_response::{Feature, File};
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use tracing::{debug, error};

use super::compiler::{GeneratedFile, compile_file};
use super::protoc::{MessageIndex, convert_file};
use crate::domain::errors::ConfigError;

pub const DEFAULT_PACKAGE_SUFFIX: &str = "connect";
const PACKAGE_SUFFIX_KEY: &str = "package_suffix";

/// protoc の parameter 文字列から読むオプション
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginOptions {
    /// 生成先の子モジュール名に付ける接尾辞。空ならパッケージのモジュールに直接置く
    pub package_suffix: String,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            package_suffix: DEFAULT_PACKAGE_SUFFIX.to_string(),
        }
    }
}

impl PluginOptions {
    /// `key=value,key=value` を読む
    pub fn parse(parameter: &str) -> Result<Self, ConfigError> {
        let mut options = Self::default();
        for pair in parameter.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| ConfigError::MalformedOption(pair.to_string()))?;
            match key.trim() {
                PACKAGE_SUFFIX_KEY => options.package_suffix = value.trim().to_string(),
                _ => return Err(ConfigError::UnknownOption(key.trim().to_string())),
            }
        }
        Ok(options)
    }
}

/// protoc に申告する機能
///
/// editions（最小/最大 edition の申告）は prost-types 0.13 の `CodeGeneratorResponse` に
/// フィールドがないため出していない。
pub const SUPPORTED_FEATURES: u64 = Feature::Proto3Optional as u64;

/// プラグイン 1 回分の実行
pub fn generate(request: &CodeGeneratorRequest) -> CodeGeneratorResponse {
    match run(request) {
        Ok(files) => CodeGeneratorResponse {
            supported_features: Some(SUPPORTED_FEATURES),
            file: files
                .into_iter()
                .map(|f| File {
                    name: Some(f.name),
                    content: Some(f.content),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        },
        Err(err) => {
            error!(error = %err, "code generation failed");
            CodeGeneratorResponse {
                error: Some(err.to_string()),
                supported_features: Some(SUPPORTED_FEATURES),
                ..Default::default()
            }
        }
    }
}

fn run(request: &CodeGeneratorRequest) -> Result<Vec<GeneratedFile>, ConfigError> {
    let options = PluginOptions::parse(request.parameter())?;
    debug!(?options, targets = request.file_to_generate.len(), "plugin run");

    let index = MessageIndex::build(&request.proto_file);
    let mut generated = Vec::new();
    for proto in request
        .proto_file
        .iter()
        .filter(|f| request.file_to_generate.iter().any(|t| t == f.name()))
    {
        let file = convert_file(proto, &index);
        if let Some(out) = compile_file(&file, &options)? {
            generated.push(out);
        }
    }
    Ok(generated)
}
