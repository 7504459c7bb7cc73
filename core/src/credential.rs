// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt::{Debug, Formatter};

use crate::utils::Redact;
use crate::{Error, Result};

/// Credential holds the key pair used for signing.
///
/// The access key id is public and ends up in every signed URL. The secret
/// access key only ever feeds the HMAC and is redacted in `Debug` output.
#[derive(Clone)]
pub struct Credential {
    access_key_id: String,
    secret_access_key: String,
}

impl Credential {
    /// Create a new credential.
    ///
    /// Returns a config invalid error if the secret access key is empty.
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Result<Self> {
        let access_key_id = access_key_id.into();
        let secret_access_key = secret_access_key.into();

        if access_key_id.is_empty() {
            return Err(Error::config_invalid("access key id must not be empty"));
        }
        if secret_access_key.is_empty() {
            return Err(Error::config_invalid("secret access key must not be empty"));
        }

        Ok(Self {
            access_key_id,
            secret_access_key,
        })
    }

    /// The public access key id.
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// The secret key as raw bytes for the keyed hash.
    pub(crate) fn secret_key_bytes(&self) -> &[u8] {
        self.secret_access_key.as_bytes()
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_credential_requires_secret() {
        let err = Credential::new("AKIDEXAMPLE", "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let err = Credential::new("", "secret").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_credential_debug_hides_secret() {
        let cred = Credential::new(
            "AKIDEXAMPLE",
            "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY",
        )
        .unwrap();

        let s = format!("{cred:?}");
        assert!(!s.contains("wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY"));
        assert!(s.contains("wJa***KEY"));
        assert_eq!(cred.access_key_id(), "AKIDEXAMPLE");
    }
}
