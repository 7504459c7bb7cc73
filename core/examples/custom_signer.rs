use http::header::DATE;
use http::Method;
use urlgen_core::assemble::{apply_authorization, bare_url, presigned_url};
use urlgen_core::canonical::{string_to_sign, CanonicalRules};
use urlgen_core::path::{KeyEscape, SubResource};
use urlgen_core::time::{format_http_date, DateTime};
use urlgen_core::{
    Credential, Endpoint, Env, OsEnv, RequestDescriptor, Result, SignRequest, Signature,
    SignatureAlgorithm, SignedRequest, SigningMethod, Signer,
};

// Google Cloud Storage interoperability signs `x-goog-` headers the same way.
const GOOG_RULES: CanonicalRules = CanonicalRules {
    extension_prefix: Some("x-goog-"),
    default_content_type: "",
    subresources: &[SubResource::Acl],
};

#[derive(Debug)]
struct GoogleInteropSigner {
    endpoint: Endpoint,
}

impl SignRequest for GoogleInteropSigner {
    fn sign_request(
        &self,
        req: RequestDescriptor,
        cred: &Credential,
        now: DateTime,
        method: SigningMethod,
    ) -> Result<SignedRequest> {
        let path = req.path(KeyEscape::PreserveSlash)?;
        let RequestDescriptor {
            method: http_method,
            params,
            mut headers,
            ..
        } = req;

        let date = match method {
            SigningMethod::Header => match headers.get(DATE) {
                Some(v) => v.to_str()?.to_string(),
                None => format_http_date(now),
            },
            SigningMethod::Query(expires) => expires.to_string(),
        };

        let s = string_to_sign(&http_method, &headers, &date, &path, &GOOG_RULES)?;
        let signature = Signature::compute(cred, &s, SignatureAlgorithm::HmacSha1)?;

        let url = match method {
            SigningMethod::Header => {
                apply_authorization(&mut headers, &date, &signature, cred.access_key_id())?;
                bare_url(&self.endpoint, &path, &params)
            }
            SigningMethod::Query(expires) => presigned_url(
                &self.endpoint,
                &path,
                &params,
                &signature,
                expires,
                cred.access_key_id(),
                &[],
            ),
        };

        Ok(SignedRequest {
            method: http_method,
            url,
            headers,
        })
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cred = Credential::new(
        OsEnv
            .var("MY_ACCESS_KEY")
            .unwrap_or_else(|| "demo-access-key".to_string()),
        OsEnv
            .var("MY_SECRET_KEY")
            .unwrap_or_else(|| "demo-secret-key".to_string()),
    )?;
    let signer = Signer::new(
        cred,
        GoogleInteropSigner {
            endpoint: Endpoint::new("storage.googleapis.com", None, true),
        },
    );
    signer.set_expires_in(3600);

    let req = RequestDescriptor::new(Method::GET)
        .with_collection("my-bucket")
        .with_item("reports/2024.csv")
        .with_header("x-goog-meta-owner", "analytics")?;

    let presigned = signer.presign(req.clone())?;
    println!("Pre-signed URL: {}", presigned.url);

    let signed = signer.sign(req)?;
    println!("URL: {}", signed.url);
    for (name, value) in signed.headers.iter() {
        println!("  {name}: {value:?}");
    }

    Ok(())
}
