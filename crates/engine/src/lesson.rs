use crate::Error;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// One worked illustration within a lesson
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Example {
    pub title: String,
    pub analogy: String,
    pub code: String,
    pub explanation: String,
}

/// The structured instructional content for one topic. A lesson is only ever built whole from a
/// response; every field is required.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub title: String,
    pub introduction: String,
    pub key_concepts: Vec<String>,
    pub examples: Vec<Example>,
}

impl Lesson {
    /// Parse a lesson from the JSON text returned by the generative API
    pub fn from_json(text: &str) -> Result<Self, Error> {
        if text.trim().is_empty() {
            return Err(Error::EmptyResponse);
        }
        serde_json::from_str(text).map_err(|e| Error::MalformedResponse(e.to_string()))
    }

    /// The output-shape constraint sent with every request
    pub fn schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "title": {
                    "type": "STRING",
                    "description": "O título da aula."
                },
                "introduction": {
                    "type": "STRING",
                    "description": "O texto introdutório exato fornecido nas instruções."
                },
                "keyConcepts": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "Lista de conceitos chave abordados."
                },
                "examples": {
                    "type": "ARRAY",
                    "description": format!(
                        "Lista de EXATAMENTE {} exemplos práticos com analogias.",
                        crate::prompt::EXAMPLE_COUNT
                    ),
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "title": {
                                "type": "STRING",
                                "description": "Título do exemplo (ex: Construtores como Receitas)"
                            },
                            "analogy": {
                                "type": "STRING",
                                "description": "Uma analogia criativa da vida real explicando o conceito em detalhes."
                            },
                            "code": {
                                "type": "STRING",
                                "description": "Código Python prático, extenso e bem comentado."
                            },
                            "explanation": {
                                "type": "STRING",
                                "description": "Explicação técnica detalhada de como o código funciona linha a linha."
                            }
                        },
                        "required": ["title", "analogy", "code", "explanation"]
                    }
                }
            },
            "required": ["title", "introduction", "keyConcepts", "examples"]
        })
    }
}
