//! Schema compiler - 1 ファイル分の service 定義から Rust コードを生成する
//!
//! # 生成物（メソッドを持つ service ごと）
//! 1. `<SERVICE>_NAME` 定数
//! 2. `<SERVICE>_<METHOD>_PROCEDURE` 定数
//! 3. `<Service>Handler` trait（全メソッド、形状ごとのシグネチャ）
//! 4. `new_<service>_handler` 構築関数（unary メソッドだけルーティング）
//!
//! メソッドを持つ service が 1 つもなければファイル自体を生成しません。
//!
//! # メッセージ型の要件
//! 入出力型は prost の出力をそのまま参照しますが、ランタイムの `Message` は
//! serde 型に対して実装されるので、prost-build 側で serde の derive を足す必要があります。
//!
//! ```text
//! prost_build::Config::new()
//!     .type_attribute(".", "#[derive(serde::Serialize, serde::Deserialize)]")
//!     .compile_protos(&["demo/echo.proto"], &["."])?;
//! ```

use heck::ToSnakeCase;
use tracing::{info, warn};

use super::names;
use super::plugin::PluginOptions;
use super::printer::CodeWriter;
use super::signature::{RUNTIME, ServerSignature};
use crate::domain::descriptor::{FileDescriptor, MessageRef, ServiceDescriptor};
use crate::domain::errors::ConfigError;

pub const GENERATED_EXTENSION: &str = ".switchboard.rs";

/// 生成された 1 ファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// protoc の出力ディレクトリからの相対パス
    pub name: String,
    pub content: String,
}

/// 生成先モジュールの位置
///
/// 生成ファイルはパッケージのモジュール（prost の出力と同じ場所）か、
/// その子モジュール `<package>_<suffix>` に `include!` される前提です。
struct ModuleScope<'a> {
    package: Vec<&'a str>,
    nested: bool,
}

impl<'a> ModuleScope<'a> {
    fn new(package: &'a str, suffix: &str) -> Self {
        Self {
            package: split_package(package),
            nested: !suffix.is_empty(),
        }
    }

    /// このモジュールから見たメッセージ型のパス
    fn message_type(&self, message: &MessageRef) -> String {
        let target = split_package(&message.package);
        let common = self
            .package
            .iter()
            .zip(&target)
            .take_while(|(a, b)| a == b)
            .count();

        let ups = self.package.len() - common + usize::from(self.nested);
        let mut parts: Vec<String> = std::iter::repeat_n("super".to_string(), ups).collect();
        parts.extend(target[common..].iter().map(|s| names::module_segment(s)));
        parts.push(names::message_path(&message.name));
        parts.join("::")
    }
}

fn split_package(package: &str) -> Vec<&str> {
    package.split('.').filter(|s| !s.is_empty()).collect()
}

/// 1 ファイル分をコンパイルする
///
/// メソッドを持つ service がなければ `Ok(None)`（エラーではない）。
/// `package_suffix` の検証はその後に行う。
pub fn compile_file(
    file: &FileDescriptor,
    options: &PluginOptions,
) -> Result<Option<GeneratedFile>, ConfigError> {
    for skipped in file.services.iter().filter(|s| s.methods.is_empty()) {
        warn!(file = %file.name, service = %skipped.full_name, "service has no methods, skipping");
    }
    let services: Vec<&ServiceDescriptor> = file.routable_services().collect();
    if services.is_empty() {
        return Ok(None);
    }

    let suffix = options.package_suffix.as_str();
    if !suffix.is_empty() && !names::is_valid_identifier(suffix) {
        return Err(ConfigError::InvalidPackageSuffix(suffix.to_string()));
    }

    let scope = ModuleScope::new(&file.package, suffix);
    let mut w = CodeWriter::new();
    preamble(&mut w, file);
    constants(&mut w, &services);
    for service in &services {
        server_trait(&mut w, service, &scope);
        server_constructor(&mut w, service, &scope);
    }

    let name = output_path(file, suffix);
    info!(file = %file.name, output = %name, services = services.len(), "generated service file");
    Ok(Some(GeneratedFile {
        name,
        content: w.finish(),
    }))
}

/// `demo/echo.proto` → `demo/echo.switchboard.rs`
/// （suffix 付きなら `demo/demo_connect/echo.switchboard.rs`）
fn output_path(file: &FileDescriptor, suffix: &str) -> String {
    let stem = file.name.strip_suffix(".proto").unwrap_or(&file.name);
    let (dir, base) = match stem.rsplit_once('/') {
        Some((dir, base)) => (Some(dir), base),
        None => (None, stem),
    };

    let mut path = String::new();
    if let Some(dir) = dir {
        path.push_str(dir);
        path.push('/');
    }
    if !suffix.is_empty() {
        let module = split_package(&file.package)
            .last()
            .map(|s| s.to_snake_case())
            .unwrap_or_else(|| base.to_snake_case());
        path.push_str(&format!("{module}_{suffix}/"));
    }
    path.push_str(base);
    path.push_str(GENERATED_EXTENSION);
    path
}

fn preamble(w: &mut CodeWriter, file: &FileDescriptor) {
    w.line("// This file is @generated by protoc-gen-switchboard. DO NOT EDIT.");
    w.line(format!("// source: {}", file.name));
    w.line("//");
    w.line("// Request and response types must implement serde::Serialize and serde::Deserialize.");
    w.line("// With prost-build, add:");
    w.line("//   .type_attribute(\".\", \"#[derive(serde::Serialize, serde::Deserialize)]\")");
    w.blank();
}

fn constants(w: &mut CodeWriter, services: &[&ServiceDescriptor]) {
    for service in services {
        w.line(format!(
            "pub const {}: &str = \"{}\";",
            names::service_name_const(service),
            service.full_name
        ));
    }
    w.blank();

    for bound in services.iter().flat_map(|s| s.methods()) {
        w.line(format!(
            "pub const {}: &str = \"{}\";",
            names::procedure_const(bound.service(), bound.method()),
            bound.procedure()
        ));
    }
    w.blank();
}

fn server_trait(w: &mut CodeWriter, service: &ServiceDescriptor, scope: &ModuleScope<'_>) {
    if let Some(comments) = &service.comments {
        w.doc(comments);
    }
    if service.deprecated {
        w.line("#[deprecated]");
    }
    w.line(format!("#[{RUNTIME}::async_trait]"));
    w.open(format!(
        "pub trait {}: Send + Sync + 'static",
        names::handler_trait(service)
    ));
    for (i, bound) in service.methods().enumerate() {
        let method = bound.method();
        if i > 0 {
            w.blank();
        }
        if let Some(comments) = &method.comments {
            w.doc(comments);
        }
        if method.deprecated {
            w.line("#[deprecated]");
        }
        let sig = ServerSignature::synthesize(
            names::method_member(method),
            bound.shape(),
            &scope.message_type(&method.input),
            &scope.message_type(&method.output),
        );
        w.line(sig.to_string());
    }
    w.close("");
    w.blank();
}

fn server_constructor(w: &mut CodeWriter, service: &ServiceDescriptor, scope: &ModuleScope<'_>) {
    let trait_name = names::handler_trait(service);
    let prefix = service.wire_prefix();

    w.line(format!(
        "/// Builds the router for `{}`. Returns the path prefix to mount it under.",
        service.full_name
    ));
    w.line("///");
    w.line("/// Only unary methods are routed.");
    if service.deprecated {
        w.line("#[deprecated]");
    }
    if service.deprecated || service.methods.iter().any(|m| m.deprecated) {
        w.line("#[allow(deprecated)]");
    }
    w.line(format!(
        "pub fn {}<H: {trait_name}>(",
        names::handler_constructor(service)
    ));
    w.indent();
    w.line("svc: H,");
    w.line(format!("opts: &[{RUNTIME}::HandlerOption],"));
    w.dedent();
    w.open(format!(
        ") -> ::std::result::Result<(&'static str, {RUNTIME}::ServiceRouter), {RUNTIME}::ConfigError>"
    ));

    let unary: Vec<_> = service.methods().filter(|b| b.shape().is_unary()).collect();
    if unary.is_empty() {
        w.line("let _ = (svc, opts);");
    } else {
        w.line("let svc = ::std::sync::Arc::new(svc);");
    }
    for bound in &unary {
        let method = bound.method();
        w.line(format!(
            "let {} = {RUNTIME}::Handler::new(",
            names::procedure_handler_var(service, method)
        ));
        w.indent();
        w.line(format!("{},", names::procedure_const(service, method)));
        w.line("{");
        w.indent();
        w.line("let svc = ::std::sync::Arc::clone(&svc);");
        w.open(format!(
            "move |ctx: {RUNTIME}::CallContext, req: {RUNTIME}::Request<{}>|",
            scope.message_type(&method.input)
        ));
        w.line("let svc = ::std::sync::Arc::clone(&svc);");
        w.line(format!(
            "async move {{ svc.{}(ctx, req).await }}",
            names::method_member(method)
        ));
        w.close("");
        w.close(",");
        w.line("opts,");
        w.dedent();
        w.line(")?;");
    }

    w.line(format!("let router = {RUNTIME}::ServiceRouter::builder(\"{prefix}\")"));
    w.indent();
    for bound in &unary {
        w.line(format!(
            ".route({}, {})?",
            names::procedure_const(service, bound.method()),
            names::procedure_handler_var(service, bound.method())
        ));
    }
    w.line(".build();");
    w.dedent();
    w.line(format!("::std::result::Result::Ok((\"{prefix}\", router))"));
    w.close("");
    w.blank();
}
