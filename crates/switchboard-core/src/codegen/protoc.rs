//! protoc adapter - `prost_types` の descriptor をドメインの descriptor に変換する
//!
//! - メッセージ型の参照（`.demo.Outer.Inner`）はリクエスト内の全ファイルから
//!   パッケージとネスト名に分解する
//! - service / method の先頭コメントは `SourceCodeInfo` から拾う

use std::collections::HashMap;

use prost_types::{DescriptorProto, FileDescriptorProto, SourceCodeInfo};

use crate::domain::descriptor::{FileDescriptor, MessageRef, MethodDescriptor, ServiceDescriptor};

// descriptor.proto のフィールド番号
const FILE_SERVICE_FIELD: i32 = 6;
const SERVICE_METHOD_FIELD: i32 = 2;

/// 完全修飾名（先頭の `.` なし）→ メッセージ参照
#[derive(Debug, Default)]
pub struct MessageIndex {
    messages: HashMap<String, MessageRef>,
}

impl MessageIndex {
    pub fn build<'a>(files: impl IntoIterator<Item = &'a FileDescriptorProto>) -> Self {
        let mut index = Self::default();
        for file in files {
            for message in &file.message_type {
                index.insert(file.package(), None, message);
            }
        }
        index
    }

    fn insert(&mut self, package: &str, outer: Option<&str>, message: &DescriptorProto) {
        let name = match outer {
            Some(outer) => format!("{outer}.{}", message.name()),
            None => message.name().to_string(),
        };
        for nested in &message.nested_type {
            self.insert(package, Some(&name), nested);
        }
        let reference = MessageRef::new(package, name);
        self.messages.insert(reference.full_name(), reference);
    }

    /// `.demo.EchoReq` を解決する。索引にない型はパッケージなしの名前として扱う
    pub fn resolve(&self, type_name: &str) -> MessageRef {
        let full = type_name.trim_start_matches('.');
        self.messages
            .get(full)
            .cloned()
            .unwrap_or_else(|| MessageRef::new("", full))
    }
}

/// `FileDescriptorProto` を変換する
pub fn convert_file(file: &FileDescriptorProto, index: &MessageIndex) -> FileDescriptor {
    let package = file.package();
    let comments = Comments::new(file.source_code_info.as_ref());

    let services = file
        .service
        .iter()
        .enumerate()
        .map(|(si, service)| {
            let full_name = if package.is_empty() {
                service.name().to_string()
            } else {
                format!("{package}.{}", service.name())
            };
            let svc_path = [FILE_SERVICE_FIELD, si as i32];

            let methods = service
                .method
                .iter()
                .enumerate()
                .map(|(mi, method)| MethodDescriptor {
                    name: method.name().to_string(),
                    input: index.resolve(method.input_type()),
                    output: index.resolve(method.output_type()),
                    client_streaming: method.client_streaming(),
                    server_streaming: method.server_streaming(),
                    deprecated: method.options.as_ref().is_some_and(|o| o.deprecated()),
                    comments: comments.leading(&[
                        FILE_SERVICE_FIELD,
                        si as i32,
                        SERVICE_METHOD_FIELD,
                        mi as i32,
                    ]),
                })
                .collect();

            ServiceDescriptor {
                name: service.name().to_string(),
                full_name,
                methods,
                deprecated: service.options.as_ref().is_some_and(|o| o.deprecated()),
                comments: comments.leading(&svc_path),
            }
        })
        .collect();

    FileDescriptor {
        name: file.name().to_string(),
        package: package.to_string(),
        services,
    }
}

/// location path → leading comments
struct Comments<'a> {
    leading: HashMap<&'a [i32], &'a str>,
}

impl<'a> Comments<'a> {
    fn new(info: Option<&'a SourceCodeInfo>) -> Self {
        let leading = info
            .into_iter()
            .flat_map(|info| &info.location)
            .filter_map(|loc| {
                let text = loc.leading_comments.as_deref()?;
                Some((loc.path.as_slice(), text))
            })
            .collect();
        Self { leading }
    }

    fn leading(&self, path: &[i32]) -> Option<String> {
        self.leading
            .get(path)
            .filter(|text| !text.trim().is_empty())
            .map(|text| text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::descriptor::StreamingShape;
    use prost_types::source_code_info::Location;
    use prost_types::{MethodDescriptorProto, MethodOptions, ServiceDescriptorProto, ServiceOptions};

    fn message(name: &str, nested: Vec<DescriptorProto>) -> DescriptorProto {
        DescriptorProto {
            name: Some(name.to_string()),
            nested_type: nested,
            ..Default::default()
        }
    }

    fn method(name: &str, input: &str, output: &str) -> MethodDescriptorProto {
        MethodDescriptorProto {
            name: Some(name.to_string()),
            input_type: Some(input.to_string()),
            output_type: Some(output.to_string()),
            ..Default::default()
        }
    }

    fn echo_proto() -> FileDescriptorProto {
        let mut chat = method("Chat", ".demo.EchoReq", ".demo.Outer.Inner");
        chat.client_streaming = Some(true);
        chat.server_streaming = Some(true);
        let mut old = method("Old", ".demo.EchoReq", ".demo.EchoResp");
        old.options = Some(MethodOptions {
            deprecated: Some(true),
            ..Default::default()
        });

        FileDescriptorProto {
            name: Some("demo/echo.proto".to_string()),
            package: Some("demo".to_string()),
            message_type: vec![
                message("EchoReq", vec![]),
                message("EchoResp", vec![]),
                message("Outer", vec![message("Inner", vec![])]),
            ],
            service: vec![ServiceDescriptorProto {
                name: Some("Echo".to_string()),
                method: vec![method("Do", ".demo.EchoReq", ".demo.EchoResp"), chat, old],
                options: Some(ServiceOptions {
                    deprecated: Some(false),
                    ..Default::default()
                }),
                ..Default::default()
            }],
            source_code_info: Some(SourceCodeInfo {
                location: vec![
                    Location {
                        path: vec![6, 0],
                        leading_comments: Some(" Echo service.\n".to_string()),
                        ..Default::default()
                    },
                    Location {
                        path: vec![6, 0, 2, 0],
                        leading_comments: Some(" Do echoes.\n".to_string()),
                        ..Default::default()
                    },
                    Location {
                        path: vec![6, 0, 2, 1],
                        leading_comments: Some("  \n".to_string()),
                        ..Default::default()
                    },
                ],
            }),
            ..Default::default()
        }
    }

    #[test]
    fn index_resolves_nested_and_unknown_types() {
        let file = echo_proto();
        let index = MessageIndex::build([&file]);
        assert_eq!(index.resolve(".demo.EchoReq"), MessageRef::new("demo", "EchoReq"));
        assert_eq!(index.resolve(".demo.Outer.Inner"), MessageRef::new("demo", "Outer.Inner"));
        assert_eq!(index.resolve(".other.Thing"), MessageRef::new("", "other.Thing"));
    }

    #[test]
    fn converts_services_methods_and_comments() {
        let file = echo_proto();
        let index = MessageIndex::build([&file]);
        let converted = convert_file(&file, &index);

        assert_eq!(converted.name, "demo/echo.proto");
        let svc = &converted.services[0];
        assert_eq!(svc.full_name, "demo.Echo");
        assert!(!svc.deprecated);
        assert_eq!(svc.comments.as_deref(), Some(" Echo service.\n"));

        let shapes: Vec<_> = svc.methods.iter().map(|m| m.shape()).collect();
        assert_eq!(
            shapes,
            vec![StreamingShape::Unary, StreamingShape::Bidi, StreamingShape::Unary]
        );
        assert_eq!(svc.methods[0].comments.as_deref(), Some(" Do echoes.\n"));
        assert_eq!(svc.methods[1].comments, None);
        assert_eq!(svc.methods[1].output, MessageRef::new("demo", "Outer.Inner"));
        assert!(svc.methods[2].deprecated);
    }
}
