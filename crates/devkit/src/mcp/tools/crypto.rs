use super::{execution_error, parse_arguments, text_result, tool, JsonRpcError, Tool};
use chrono::Utc;
use devkit_core::digest::{Algorithm, Encoding, HmacAlgorithm};
use devkit_core::jwt::JwtAlgorithm;
use devkit_core::uuid::UuidFormat;
use serde::Deserialize;

pub fn tools() -> Vec<Tool> {
    vec![
        tool(
            "hash_text",
            "Hash UTF-8 text with MD5, SHA-1, SHA-256, SHA-384 or SHA-512. Returns lowercase hex digests; all algorithms when none is given.",
            serde_json::json!({
                "text": {
                    "type": "string",
                    "description": "Text to hash"
                },
                "algorithm": {
                    "type": "string",
                    "enum": ["md5", "sha1", "sha256", "sha384", "sha512"],
                    "description": "Single algorithm (default: all)"
                }
            }),
            &["text"],
        ),
        tool(
            "hmac_sign",
            "Compute an HMAC signature over a message.",
            serde_json::json!({
                "message": { "type": "string", "description": "Message to sign" },
                "secret": { "type": "string", "description": "Shared secret" },
                "algorithm": hmac_algorithm_schema(),
                "encoding": encoding_schema()
            }),
            &["message", "secret"],
        ),
        tool(
            "hmac_verify",
            "Check an HMAC signature in constant time.",
            serde_json::json!({
                "message": { "type": "string", "description": "Signed message" },
                "secret": { "type": "string", "description": "Shared secret" },
                "signature": { "type": "string", "description": "Signature to check" },
                "algorithm": hmac_algorithm_schema(),
                "encoding": encoding_schema()
            }),
            &["message", "secret", "signature"],
        ),
        tool(
            "jwt_encode",
            "Create an HMAC-signed JSON Web Token from a JSON object payload.",
            serde_json::json!({
                "payload": {
                    "type": "object",
                    "description": "Claims, as an object or a JSON string"
                },
                "secret": { "type": "string", "description": "Signing secret" },
                "algorithm": {
                    "type": "string",
                    "enum": ["HS256", "HS384", "HS512"],
                    "description": "Signing algorithm (default: HS256)"
                }
            }),
            &["payload", "secret"],
        ),
        tool(
            "jwt_decode",
            "Decode a JSON Web Token without verifying it. Returns header, payload, algorithm and the iat/nbf/exp times, with an 'expired' flag.",
            serde_json::json!({
                "token": { "type": "string", "description": "Compact JWT" }
            }),
            &["token"],
        ),
        tool(
            "jwt_verify",
            "Verify the HMAC signature of a JSON Web Token and return its decoded contents.",
            serde_json::json!({
                "token": { "type": "string", "description": "Compact JWT" },
                "secret": { "type": "string", "description": "Signing secret" }
            }),
            &["token", "secret"],
        ),
        tool(
            "password_analyze",
            "Estimate password strength: entropy, a 0-4 score with label, a crack-time estimate and improvement tips. Runs locally.",
            serde_json::json!({
                "password": { "type": "string", "description": "Password to analyze" }
            }),
            &["password"],
        ),
        tool(
            "uuid_generate",
            "Generate random version-4 UUIDs.",
            serde_json::json!({
                "count": {
                    "type": "number",
                    "description": "How many to generate, 1-1000 (default: 1)"
                },
                "uppercase": {
                    "type": "boolean",
                    "description": "Uppercase hex digits (default: false)"
                },
                "hyphens": {
                    "type": "boolean",
                    "description": "Include hyphens (default: true)"
                }
            }),
            &[],
        ),
        tool(
            "uuid_inspect",
            "Report the version and variant of a UUID.",
            serde_json::json!({
                "uuid": { "type": "string", "description": "UUID, with or without hyphens" }
            }),
            &["uuid"],
        ),
        tool(
            "bcrypt_hash",
            "Hash a password with bcrypt. Only the first 72 bytes of the password are used; 'truncated' reports when that happened.",
            serde_json::json!({
                "password": { "type": "string", "description": "Password to hash" },
                "cost": {
                    "type": "number",
                    "description": "Cost factor, 4-14 (default: 10)"
                }
            }),
            &["password"],
        ),
        tool(
            "bcrypt_verify",
            "Check a password against a bcrypt hash ($2a$, $2b$, $2x$ or $2y$).",
            serde_json::json!({
                "password": { "type": "string", "description": "Password to check" },
                "hash": { "type": "string", "description": "bcrypt hash" }
            }),
            &["password", "hash"],
        ),
    ]
}

fn hmac_algorithm_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "enum": ["sha256", "sha384", "sha512"],
        "description": "Hash function (default: sha256)"
    })
}

fn encoding_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "enum": ["hex", "base64"],
        "description": "Signature encoding (default: hex)"
    })
}

pub fn handle_hash_text(
    arguments: Option<serde_json::Value>,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct HashArgs {
        text: String,
        algorithm: Option<Algorithm>,
    }

    let args: HashArgs = parse_arguments(arguments)?;
    let output = crate::hash::hash_data(args.text.as_bytes(), args.algorithm);
    text_result(&output)
}

pub fn handle_hmac_sign(
    arguments: Option<serde_json::Value>,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct SignArgs {
        message: String,
        secret: String,
        #[serde(default)]
        algorithm: HmacAlgorithm,
        #[serde(default)]
        encoding: Encoding,
    }

    let args: SignArgs = parse_arguments(arguments)?;
    let output = crate::hmac::sign_data(&args.message, &args.secret, args.algorithm, args.encoding)
        .map_err(execution_error)?;
    text_result(&output)
}

pub fn handle_hmac_verify(
    arguments: Option<serde_json::Value>,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct VerifyArgs {
        message: String,
        secret: String,
        signature: String,
        #[serde(default)]
        algorithm: HmacAlgorithm,
        #[serde(default)]
        encoding: Encoding,
    }

    let args: VerifyArgs = parse_arguments(arguments)?;
    let output = crate::hmac::verify_data(
        &args.message,
        &args.secret,
        &args.signature,
        args.algorithm,
        args.encoding,
    )
    .map_err(execution_error)?;
    text_result(&output)
}

pub fn handle_jwt_encode(
    arguments: Option<serde_json::Value>,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct EncodeArgs {
        payload: serde_json::Value,
        secret: String,
        #[serde(default)]
        algorithm: JwtAlgorithm,
    }

    let args: EncodeArgs = parse_arguments(arguments)?;
    let payload = match args.payload {
        serde_json::Value::String(text) => text,
        other => other.to_string(),
    };
    let output = crate::jwt::encode_data(&payload, &args.secret, args.algorithm)
        .map_err(execution_error)?;
    text_result(&output)
}

pub fn handle_jwt_decode(
    arguments: Option<serde_json::Value>,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct DecodeArgs {
        token: String,
    }

    let args: DecodeArgs = parse_arguments(arguments)?;
    let output = crate::jwt::decode_data(&args.token, Utc::now()).map_err(execution_error)?;
    text_result(&output)
}

pub fn handle_jwt_verify(
    arguments: Option<serde_json::Value>,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct VerifyArgs {
        token: String,
        secret: String,
    }

    let args: VerifyArgs = parse_arguments(arguments)?;
    let output = crate::jwt::verify_data(&args.token, &args.secret, Utc::now())
        .map_err(execution_error)?;
    text_result(&output)
}

pub fn handle_password_analyze(
    arguments: Option<serde_json::Value>,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct PasswordArgs {
        password: String,
    }

    let args: PasswordArgs = parse_arguments(arguments)?;
    text_result(&devkit_core::password::analyze(&args.password))
}

pub fn handle_uuid_generate(
    arguments: Option<serde_json::Value>,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct GenerateArgs {
        count: Option<usize>,
        #[serde(flatten)]
        format: UuidFormat,
    }

    let args: GenerateArgs = parse_arguments(arguments)?;
    let ids = devkit_core::uuid::generate(args.count.unwrap_or(1), args.format)
        .map_err(execution_error)?;
    text_result(&ids)
}

pub fn handle_uuid_inspect(
    arguments: Option<serde_json::Value>,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct InspectArgs {
        uuid: String,
    }

    let args: InspectArgs = parse_arguments(arguments)?;
    let info = devkit_core::uuid::inspect(&args.uuid).map_err(execution_error)?;
    text_result(&info)
}

pub fn handle_bcrypt_hash(
    arguments: Option<serde_json::Value>,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct HashArgs {
        password: String,
        cost: Option<u32>,
    }

    let args: HashArgs = parse_arguments(arguments)?;
    let cost = args.cost.unwrap_or(devkit_core::bcrypt_hash::DEFAULT_COST);
    let output = crate::bcrypt::hash_data(&args.password, cost).map_err(execution_error)?;
    text_result(&output)
}

pub fn handle_bcrypt_verify(
    arguments: Option<serde_json::Value>,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct VerifyArgs {
        password: String,
        hash: String,
    }

    let args: VerifyArgs = parse_arguments(arguments)?;
    let output = crate::bcrypt::verify_data(&args.password, &args.hash).map_err(execution_error)?;
    text_result(&output)
}
