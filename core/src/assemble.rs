//! Assemble signed URLs and headers.

use http::header::AUTHORIZATION;
use http::header::DATE;
use http::HeaderMap;
use http::HeaderValue;

use crate::signature::Signature;
use crate::Endpoint;
use crate::Result;

/// Form-urlencode one value the way HTML forms do: space becomes `+`.
pub fn form_encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Append `key=value` pairs to `path`, joined with `?` or `&` depending on
/// whether `path` already carries a query.
///
/// Keys and values must already be encoded.
pub fn push_query<'a>(path: &mut String, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) {
    for (key, value) in pairs {
        path.push(if path.contains('?') { '&' } else { '?' });
        path.push_str(key);
        path.push('=');
        path.push_str(value);
    }
}

/// Append caller parameters, form-urlencoded and in order.
pub fn push_params(path: &mut String, params: &[(String, String)]) {
    let encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (form_encode(k), form_encode(v)))
        .collect();
    push_query(path, encoded.iter().map(|(k, v)| (k.as_str(), v.as_str())));
}

/// Build the absolute pre-signed URL.
///
/// ```text
/// scheme://host:port/path[?params]&Signature=..&Expires=..&AWSAccessKeyId=..[&extra]
/// ```
pub fn presigned_url(
    endpoint: &Endpoint,
    path: &str,
    params: &[(String, String)],
    signature: &Signature,
    expires: i64,
    access_key_id: &str,
    extra: &[(&str, String)],
) -> String {
    let mut s = path.to_string();
    push_params(&mut s, params);

    let signature = signature.to_query_value();
    let expires = expires.to_string();
    let access_key_id = form_encode(access_key_id);
    push_query(
        &mut s,
        [
            ("Signature", signature.as_str()),
            ("Expires", expires.as_str()),
            ("AWSAccessKeyId", access_key_id.as_str()),
        ],
    );

    let extra: Vec<(&str, String)> = extra.iter().map(|(k, v)| (*k, form_encode(v))).collect();
    push_query(&mut s, extra.iter().map(|(k, v)| (*k, v.as_str())));

    endpoint.url(&s)
}

/// Build the absolute URL without any signature.
pub fn bare_url(endpoint: &Endpoint, path: &str, params: &[(String, String)]) -> String {
    let mut s = path.to_string();
    push_params(&mut s, params);
    endpoint.url(&s)
}

/// Insert the signed `Date` and the `Authorization` value into `headers`.
pub fn apply_authorization(
    headers: &mut HeaderMap,
    date: &str,
    signature: &Signature,
    access_key_id: &str,
) -> Result<()> {
    headers.insert(DATE, date.parse()?);
    headers.insert(AUTHORIZATION, {
        let mut value: HeaderValue = signature.to_authorization(access_key_id).parse()?;
        value.set_sensitive(true);

        value
    });
    Ok(())
}
