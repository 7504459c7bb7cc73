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

use urlgen_core::canonical::CanonicalRules;
use urlgen_core::path::SubResource;

pub const DEFAULT_HOST: &str = "s3.amazonaws.com";

/// API version these requests are written against.
pub const VERSION: &str = "2006-03-01";

// Headers used in s3.
pub const X_AMZ_PREFIX: &str = "x-amz-";
pub const X_AMZ_META_PREFIX: &str = "x-amz-meta-";

// Env values used in s3.
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const URLGEN_S3_HOST: &str = "URLGEN_S3_HOST";
pub const URLGEN_S3_PORT: &str = "URLGEN_S3_PORT";
pub const URLGEN_S3_SECURE: &str = "URLGEN_S3_SECURE";

pub const S3_RULES: CanonicalRules = CanonicalRules {
    extension_prefix: Some(X_AMZ_PREFIX),
    default_content_type: "",
    subresources: &[SubResource::Acl, SubResource::Torrent],
};
