//! Abstract service descriptor: services, methods and their streaming shape.
//!
//! The descriptor is supplied by the schema toolchain (see `codegen::protoc`)
//! and is immutable once built. Everything here is plain data so fixtures can
//! be written as JSON in tests.

use serde::{Deserialize, Serialize};

use super::procedure::Procedure;

/// One generation unit (one `.proto` file).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Path of the source file, e.g. `demo/echo.proto`.
    pub name: String,

    /// Dotted package, empty for package-less files.
    #[serde(default)]
    pub package: String,

    #[serde(default)]
    pub services: Vec<ServiceDescriptor>,
}

impl FileDescriptor {
    /// Services that have at least one method. Method-less services are
    /// skipped by the compiler.
    pub fn routable_services(&self) -> impl Iterator<Item = &ServiceDescriptor> {
        self.services.iter().filter(|s| !s.methods.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    /// Local identifier, e.g. `Echo`.
    pub name: String,

    /// Fully-qualified name, e.g. `demo.Echo`.
    pub full_name: String,

    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,

    #[serde(default)]
    pub deprecated: bool,

    /// Leading comments from the source file, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl ServiceDescriptor {
    pub fn new(name: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_name: full_name.into(),
            methods: Vec::new(),
            deprecated: false,
            comments: None,
        }
    }

    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    /// Methods paired with a borrow of their parent service.
    pub fn methods(&self) -> impl Iterator<Item = BoundMethod<'_>> {
        self.methods.iter().map(move |method| BoundMethod {
            service: self,
            method,
        })
    }

    /// `"/" + full_name + "/"`
    pub fn wire_prefix(&self) -> String {
        Procedure::service_prefix(&self.full_name)
    }
}

/// A reference to a message type: its package and its (possibly dotted,
/// for nested messages) name inside that package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageRef {
    #[serde(default)]
    pub package: String,
    pub name: String,
}

impl MessageRef {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    pub fn full_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    pub name: String,
    pub input: MessageRef,
    pub output: MessageRef,

    #[serde(default)]
    pub client_streaming: bool,

    #[serde(default)]
    pub server_streaming: bool,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl MethodDescriptor {
    pub fn unary(name: impl Into<String>, input: MessageRef, output: MessageRef) -> Self {
        Self {
            name: name.into(),
            input,
            output,
            client_streaming: false,
            server_streaming: false,
            deprecated: false,
            comments: None,
        }
    }

    pub fn streaming(mut self, client: bool, server: bool) -> Self {
        self.client_streaming = client;
        self.server_streaming = server;
        self
    }

    pub fn shape(&self) -> StreamingShape {
        StreamingShape::from_flags(self.client_streaming, self.server_streaming)
    }
}

/// A method together with its parent service.
#[derive(Debug, Clone, Copy)]
pub struct BoundMethod<'a> {
    service: &'a ServiceDescriptor,
    method: &'a MethodDescriptor,
}

impl<'a> BoundMethod<'a> {
    pub fn service(&self) -> &'a ServiceDescriptor {
        self.service
    }

    pub fn method(&self) -> &'a MethodDescriptor {
        self.method
    }

    pub fn procedure(&self) -> Procedure {
        Procedure::new(&self.service.full_name, &self.method.name)
    }

    pub fn shape(&self) -> StreamingShape {
        self.method.shape()
    }
}

/// Direction of streaming of a method. Exactly one per method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamingShape {
    Unary,
    ClientStream,
    ServerStream,
    Bidi,
}

impl StreamingShape {
    pub fn from_flags(client_streaming: bool, server_streaming: bool) -> Self {
        match (client_streaming, server_streaming) {
            (true, true) => StreamingShape::Bidi,
            (true, false) => StreamingShape::ClientStream,
            (false, true) => StreamingShape::ServerStream,
            (false, false) => StreamingShape::Unary,
        }
    }

    pub fn is_unary(self) -> bool {
        self == StreamingShape::Unary
    }
}
