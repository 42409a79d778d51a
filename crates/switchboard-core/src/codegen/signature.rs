//! Server signature synthesis
//!
//! ストリーミング形状ごとに、サーバー契約（trait メンバー）の引数と戻り値を決めます。
//!
//! | 形状 | 引数 | 戻り値 |
//! |---|---|---|
//! | Unary | ctx, `Request<In>` | `Result<Response<Out>, CallError>` |
//! | ServerStream | ctx, `Request<In>`, `ServerStream<Out>` | `Result<(), CallError>` |
//! | ClientStream | ctx, `ClientStream<In>` | `Result<Response<Out>, CallError>` |
//! | Bidi | ctx, `BidiStream<In, Out>` | `Result<(), CallError>` |

use std::fmt;

use crate::domain::descriptor::StreamingShape;

/// 生成コードから見たランタイムのパス
pub(crate) const RUNTIME: &str = "::switchboard_core";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub ty: String,
}

/// ServerSignature は trait メンバー 1 つ分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSignature {
    pub member: String,
    pub params: Vec<Param>,
    pub returns: String,
}

impl ServerSignature {
    /// 形状と入出力型から組み立てる（失敗しない）
    pub fn synthesize(
        member: impl Into<String>,
        shape: StreamingShape,
        input: &str,
        output: &str,
    ) -> Self {
        let ctx = Param {
            name: "ctx",
            ty: format!("{RUNTIME}::CallContext"),
        };
        let unit = format!("::std::result::Result<(), {RUNTIME}::CallError>");
        let response = format!(
            "::std::result::Result<{RUNTIME}::Response<{output}>, {RUNTIME}::CallError>"
        );

        let (params, returns) = match shape {
            StreamingShape::Unary => (
                vec![
                    ctx,
                    Param {
                        name: "req",
                        ty: format!("{RUNTIME}::Request<{input}>"),
                    },
                ],
                response,
            ),
            StreamingShape::ServerStream => (
                vec![
                    ctx,
                    Param {
                        name: "req",
                        ty: format!("{RUNTIME}::Request<{input}>"),
                    },
                    Param {
                        name: "stream",
                        ty: format!("{RUNTIME}::ServerStream<{output}>"),
                    },
                ],
                unit,
            ),
            StreamingShape::ClientStream => (
                vec![
                    ctx,
                    Param {
                        name: "stream",
                        ty: format!("{RUNTIME}::ClientStream<{input}>"),
                    },
                ],
                response,
            ),
            StreamingShape::Bidi => (
                vec![
                    ctx,
                    Param {
                        name: "stream",
                        ty: format!("{RUNTIME}::BidiStream<{input}, {output}>"),
                    },
                ],
                unit,
            ),
        };

        Self {
            member: member.into(),
            params,
            returns,
        }
    }
}

/// `async fn member(&self, ...) -> ...;`
impl fmt::Display for ServerSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "async fn {}(&self", self.member)?;
        for param in &self.params {
            write!(f, ", {}: {}", param.name, param.ty)?;
        }
        write!(f, ") -> {};", self.returns)
    }
}
