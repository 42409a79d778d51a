//! Names - 生成コードの識別子
//!
//! proto の名前（`SayHello`, `demo.v1`）を Rust の識別子に変換します。
//! キーワードとの衝突は純粋なテーブル参照で回避します。

use heck::{ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};

use crate::domain::descriptor::{MethodDescriptor, ServiceDescriptor};

/// Rust のキーワード（strict / reserved / edition 2018 以降）
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// raw identifier (`r#`) にできないキーワード
const NON_RAW_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

pub fn is_keyword(ident: &str) -> bool {
    KEYWORDS.contains(&ident)
}

/// キーワードなら `r#` を付ける。`self` などは `_` を前置する
pub fn escape_keyword(ident: &str) -> String {
    if NON_RAW_KEYWORDS.contains(&ident) {
        format!("_{ident}")
    } else if is_keyword(ident) {
        format!("r#{ident}")
    } else {
        ident.to_string()
    }
}

/// キーワードでない素の識別子か
pub fn is_valid_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if ident == "_" || !(first == '_' || first.is_alphabetic()) {
        return false;
    }
    chars.all(|c| c == '_' || c.is_alphanumeric()) && !is_keyword(ident)
}

/// `Echo` → `ECHO_NAME`
pub fn service_name_const(service: &ServiceDescriptor) -> String {
    format!("{}_NAME", service.name.to_shouty_snake_case())
}

/// `Echo` / `SayHello` → `ECHO_SAY_HELLO_PROCEDURE`
pub fn procedure_const(service: &ServiceDescriptor, method: &MethodDescriptor) -> String {
    format!(
        "{}_{}_PROCEDURE",
        service.name.to_shouty_snake_case(),
        method.name.to_shouty_snake_case()
    )
}

/// `Echo` → `EchoHandler`
pub fn handler_trait(service: &ServiceDescriptor) -> String {
    format!("{}Handler", service.name.to_upper_camel_case())
}

/// `Echo` → `new_echo_handler`
pub fn handler_constructor(service: &ServiceDescriptor) -> String {
    format!("new_{}_handler", service.name.to_snake_case())
}

/// `Do` → `r#do`
pub fn method_member(method: &MethodDescriptor) -> String {
    escape_keyword(&method.name.to_snake_case())
}

/// 構築関数内のローカル変数名: `echo_do_handler`
pub fn procedure_handler_var(service: &ServiceDescriptor, method: &MethodDescriptor) -> String {
    format!(
        "{}_{}_handler",
        service.name.to_snake_case(),
        method.name.to_snake_case()
    )
}

/// パッケージの 1 セグメント → モジュール名
pub fn module_segment(segment: &str) -> String {
    escape_keyword(&segment.to_snake_case())
}

/// メッセージ名（ネスト可）をモジュールパスに: `Outer.Inner` → `outer::Inner`
pub fn message_path(dotted_name: &str) -> String {
    let segments: Vec<&str> = dotted_name.split('.').collect();
    let (last, outer) = match segments.split_last() {
        Some(split) => split,
        None => return String::new(),
    };
    let mut parts: Vec<String> = outer.iter().map(|s| module_segment(s)).collect();
    parts.push(escape_keyword(&last.to_upper_camel_case()));
    parts.join("::")
}
