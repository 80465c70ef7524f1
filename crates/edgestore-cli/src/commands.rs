//! Subcommands

use anyhow::{bail, Context};
use clap::{Subcommand, ValueEnum};
use edgestore_client::{
    BucketType, CompletedPart, EdgeStoreClient, FileUploadRequest, Filter, ListFilesParams,
    Pagination, RequestUploadParams, RequestUploadPartsParams,
};
use serde_json::{json, Value};
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show metadata of a stored file
    GetFile {
        url: String,
    },

    /// Delete a file
    DeleteFile {
        url: String,
    },

    /// Confirm a temporary upload
    ConfirmUpload {
        url: String,
    },

    /// List files in a bucket
    ListFiles {
        bucket: String,

        /// Filter expression as JSON, e.g. '{"path":{"type":{"eq":"avatar"}}}'
        #[arg(long)]
        filter: Option<String>,

        /// Page number, starting at 1
        #[arg(long, requires = "page_size")]
        page: Option<u32>,

        #[arg(long, requires = "page")]
        page_size: Option<u32>,
    },

    /// Request a signed upload URL
    RequestUpload {
        bucket: String,

        /// File size in bytes
        #[arg(long)]
        size: u64,

        /// File extension without the dot
        #[arg(long)]
        extension: String,

        #[arg(long = "type", value_enum, default_value_t = Kind::File)]
        kind: Kind,

        /// Make the file publicly readable
        #[arg(long)]
        public: bool,

        /// Path segment as key=value, repeatable and ordered
        #[arg(long = "path", value_parser = parse_key_value)]
        path: Vec<(String, String)>,

        /// Metadata entry as key=value, repeatable
        #[arg(long = "metadata", value_parser = parse_key_value)]
        metadata: Vec<(String, String)>,

        /// URL of the file to replace
        #[arg(long)]
        replace: Option<String>,

        #[arg(long)]
        file_name: Option<String>,

        /// Keep the upload temporary until confirmed
        #[arg(long)]
        temporary: bool,
    },

    /// Sign more part URLs for a multipart upload
    RequestUploadParts {
        #[arg(long)]
        upload_id: String,

        #[arg(long)]
        key: String,

        /// Part number, repeatable
        #[arg(long = "part", required = true)]
        parts: Vec<u32>,
    },

    /// Finish a multipart upload
    CompleteMultipartUpload {
        #[arg(long)]
        upload_id: String,

        #[arg(long)]
        key: String,

        /// Uploaded part as number=etag, repeatable
        #[arg(long = "part", value_parser = parse_part, required = true)]
        parts: Vec<CompletedPart>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Image,
    File,
}

impl From<Kind> for BucketType {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Image => BucketType::Image,
            Kind::File => BucketType::File,
        }
    }
}

/// Run a subcommand and return its JSON output
pub async fn run(client: &EdgeStoreClient, command: Command) -> anyhow::Result<Value> {
    let output = match command {
        Command::GetFile { url } => serde_json::to_value(client.get_file(&url).await?)?,
        Command::DeleteFile { url } => {
            let success = client.delete_file(&url).await?;
            info!("Deleted {}: {}", url, success);
            json!({ "success": success })
        }
        Command::ConfirmUpload { url } => {
            json!({ "success": client.confirm_upload(&url).await? })
        }
        Command::ListFiles {
            bucket,
            filter,
            page,
            page_size,
        } => {
            let mut params = ListFilesParams::new(bucket);
            if let Some(raw) = filter {
                params = params.with_filter(parse_filter(&raw)?);
            }
            if let (Some(page), Some(page_size)) = (page, page_size) {
                params = params.with_pagination(Pagination::new(page, page_size));
            }
            serde_json::to_value(client.list_files(&params).await?)?
        }
        Command::RequestUpload {
            bucket,
            size,
            extension,
            kind,
            public,
            path,
            metadata,
            replace,
            file_name,
            temporary,
        } => {
            let mut file = FileUploadRequest::new(size, extension);
            file.is_public = public;
            file.temporary = temporary;
            file.replace_target_url = replace;
            file.file_name = file_name;
            for (key, value) in path {
                file = file.with_path(key, value);
            }
            for (key, value) in metadata {
                file = file.with_metadata(key, value);
            }

            let params = RequestUploadParams::new(bucket, file).with_bucket_type(kind.into());
            serde_json::to_value(client.request_upload(&params).await?)?
        }
        Command::RequestUploadParts {
            upload_id,
            key,
            parts,
        } => {
            let params = RequestUploadPartsParams::new(upload_id, key, parts);
            serde_json::to_value(client.request_upload_parts(&params).await?)?
        }
        Command::CompleteMultipartUpload {
            upload_id,
            key,
            parts,
        } => {
            let success = client
                .complete_multipart_upload(&upload_id, &key, &parts)
                .await?;
            json!({ "success": success })
        }
    };

    Ok(output)
}

fn parse_filter(raw: &str) -> anyhow::Result<Filter> {
    serde_json::from_str(raw).context("invalid --filter JSON")
}

fn parse_key_value(raw: &str) -> anyhow::Result<(String, String)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("expected key=value, got '{raw}'");
    };
    if key.is_empty() {
        bail!("empty key in '{raw}'");
    }
    Ok((key.to_string(), value.to_string()))
}

fn parse_part(raw: &str) -> anyhow::Result<CompletedPart> {
    let (number, etag) = parse_key_value(raw)?;
    let number = number
        .parse()
        .with_context(|| format!("invalid part number '{number}'"))?;
    Ok(CompletedPart::new(number, etag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use edgestore_client::{routes, Config, CredentialsInput};
    use rstest::rstest;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(subcommand)]
        command: Command,
    }

    #[rstest]
    #[case("type=avatar", ("type", "avatar"))]
    #[case("url=https://a.example/?x=1", ("url", "https://a.example/?x=1"))]
    #[case("empty=", ("empty", ""))]
    fn test_parse_key_value(#[case] raw: &str, #[case] expected: (&str, &str)) {
        let (key, value) = parse_key_value(raw).unwrap();
        assert_eq!((key.as_str(), value.as_str()), expected);
    }

    #[rstest]
    #[case("novalue")]
    #[case("=value")]
    fn test_parse_key_value_rejects(#[case] raw: &str) {
        assert!(parse_key_value(raw).is_err());
    }

    #[test]
    fn test_parse_part() {
        let part = parse_part("2=\"etag-2\"").unwrap();
        assert_eq!(part, CompletedPart::new(2, "etag-2"));
        assert!(parse_part("x=etag").is_err());
    }

    #[test]
    fn test_parse_filter() {
        let filter = parse_filter(r#"{"path":{"type":{"eq":"avatar"}}}"#).unwrap();
        assert!(filter.path.contains_key("type"));
        assert!(parse_filter("{").is_err());
    }

    #[test]
    fn test_parse_filter_rejects_unknown_operator() {
        assert!(parse_filter(r#"{"path":{"type":{"eqq":"x"}}}"#).is_err());
    }

    #[test]
    fn test_request_upload_args() {
        let cli = TestCli::try_parse_from([
            "edgestore",
            "request-upload",
            "publicImages",
            "--size",
            "1024",
            "--extension",
            "png",
            "--type",
            "image",
            "--path",
            "org=acme",
            "--path",
            "type=avatar",
            "--public",
        ])
        .unwrap();

        match cli.command {
            Command::RequestUpload {
                bucket,
                kind,
                path,
                public,
                ..
            } => {
                assert_eq!(bucket, "publicImages");
                assert_eq!(kind, Kind::Image);
                assert!(public);
                assert_eq!(
                    path,
                    vec![
                        ("org".to_string(), "acme".to_string()),
                        ("type".to_string(), "avatar".to_string())
                    ]
                );
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_page_requires_page_size() {
        let result = TestCli::try_parse_from(["edgestore", "list-files", "docs", "--page", "2"]);
        assert!(result.is_err());
    }

    fn parse(args: &[&str]) -> Command {
        let argv = std::iter::once("edgestore").chain(args.iter().copied());
        TestCli::try_parse_from(argv).unwrap().command
    }

    fn client_for(server: &MockServer) -> EdgeStoreClient {
        EdgeStoreClient::create_with_config(
            Config::new(server.uri()),
            CredentialsInput::new()
                .with_access_key("ak")
                .with_secret_key("sk"),
            |_| None,
        )
        .unwrap()
    }

    async fn expect_body(server: &MockServer, route: &str, body: Value, response: Value) {
        Mock::given(method("POST"))
            .and(path(route))
            .and(body_json(body))
            .respond_with(ResponseTemplate::new(200).set_body_json(response))
            .expect(1)
            .mount(server)
            .await;
    }

    fn file_json(url: &str) -> Value {
        json!({
            "url": url,
            "size": 512,
            "uploadedAt": "2024-03-01T12:00:00Z",
            "path": {"type": "avatar"},
            "metadata": {}
        })
    }

    #[tokio::test]
    async fn test_run_request_upload_maps_flags() {
        let server = MockServer::start().await;
        expect_body(
            &server,
            routes::REQUEST_UPLOAD,
            json!({
                "bucketName": "publicImages",
                "bucketType": "IMAGE",
                "fileInfo": {
                    "size": 1024,
                    "extension": "png",
                    "isPublic": false,
                    "path": [{"key": "type", "value": "avatar"}],
                    "metadata": {"owner": "u1", "team": "core"},
                    "replaceTargetUrl": "https://files.edgestore.dev/old.png",
                    "fileName": "me.png",
                    "temporary": true
                }
            }),
            json!({"signedUrl": "https://signed.example/put", "url": "https://files.edgestore.dev/new.png"}),
        )
        .await;

        let command = parse(&[
            "request-upload",
            "publicImages",
            "--size",
            "1024",
            "--extension",
            "png",
            "--type",
            "image",
            "--path",
            "type=avatar",
            "--metadata",
            "owner=u1",
            "--metadata",
            "team=core",
            "--replace",
            "https://files.edgestore.dev/old.png",
            "--file-name",
            "me.png",
            "--temporary",
        ]);
        let output = run(&client_for(&server), command).await.unwrap();

        assert_eq!(
            output,
            json!({
                "signedUrl": "https://signed.example/put",
                "accessUrl": "https://files.edgestore.dev/new.png"
            })
        );
    }

    #[tokio::test]
    async fn test_run_list_files_with_filter_and_page() {
        let server = MockServer::start().await;
        let url = "https://files.edgestore.dev/docs/a.pdf";
        expect_body(
            &server,
            routes::LIST_FILES,
            json!({
                "bucketName": "docs",
                "filter": {"path": {"type": {"eq": "avatar"}}},
                "pagination": {"currentPage": 2, "pageSize": 10}
            }),
            json!({
                "data": [file_json(url)],
                "pagination": {"currentPage": 2, "pageSize": 10, "totalPages": 3, "totalCount": 21}
            }),
        )
        .await;

        let command = parse(&[
            "list-files",
            "docs",
            "--filter",
            r#"{"path":{"type":{"eq":"avatar"}}}"#,
            "--page",
            "2",
            "--page-size",
            "10",
        ]);
        let output = run(&client_for(&server), command).await.unwrap();

        assert_eq!(output["data"][0]["url"], url);
        assert_eq!(output["data"][0]["path"], json!({"type": "avatar"}));
        assert_eq!(
            output["pagination"],
            json!({"currentPage": 2, "pageSize": 10, "totalPages": 3, "totalCount": 21})
        );
    }

    #[tokio::test]
    async fn test_run_list_files_without_page_sends_no_pagination() {
        let server = MockServer::start().await;
        expect_body(
            &server,
            routes::LIST_FILES,
            json!({"bucketName": "docs"}),
            json!({
                "data": [],
                "pagination": {"currentPage": 1, "pageSize": 20, "totalPages": 0, "totalCount": 0}
            }),
        )
        .await;

        let output = run(&client_for(&server), parse(&["list-files", "docs"]))
            .await
            .unwrap();

        assert_eq!(output["data"], json!([]));
    }

    #[rstest]
    #[case("delete-file", routes::DELETE_FILE)]
    #[case("confirm-upload", routes::CONFIRM_UPLOAD)]
    #[tokio::test]
    async fn test_run_success_output(#[case] subcommand: &str, #[case] route: &str) {
        let server = MockServer::start().await;
        let url = "https://files.edgestore.dev/docs/a.pdf";
        expect_body(&server, route, json!({"url": url}), json!({"success": true})).await;

        let output = run(&client_for(&server), parse(&[subcommand, url]))
            .await
            .unwrap();

        assert_eq!(output, json!({"success": true}));
    }

    #[tokio::test]
    async fn test_run_get_file_output() {
        let server = MockServer::start().await;
        let url = "https://files.edgestore.dev/docs/a.pdf";
        expect_body(&server, routes::GET_FILE, json!({"url": url}), file_json(url)).await;

        let output = run(&client_for(&server), parse(&["get-file", url]))
            .await
            .unwrap();

        assert_eq!(output["url"], url);
        assert_eq!(output["size"], 512);
        assert_eq!(output["metadata"], json!({}));
    }

    #[tokio::test]
    async fn test_run_complete_multipart_upload() {
        let server = MockServer::start().await;
        expect_body(
            &server,
            routes::COMPLETE_MULTIPART_UPLOAD,
            json!({
                "uploadId": "up-1",
                "key": "docs/big.bin",
                "parts": [
                    {"partNumber": 1, "eTag": "e1"},
                    {"partNumber": 2, "eTag": "e2"}
                ]
            }),
            json!({"success": true}),
        )
        .await;

        let command = parse(&[
            "complete-multipart-upload",
            "--upload-id",
            "up-1",
            "--key",
            "docs/big.bin",
            "--part",
            "1=\"e1\"",
            "--part",
            "2=e2",
        ]);
        let output = run(&client_for(&server), command).await.unwrap();

        assert_eq!(output, json!({"success": true}));
    }

    #[tokio::test]
    async fn test_run_surfaces_backend_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(routes::GET_FILE))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"code": "NOT_FOUND", "message": "gone"})),
            )
            .mount(&server)
            .await;

        let err = run(&client_for(&server), parse(&["get-file", "https://x/y"]))
            .await
            .unwrap_err();

        let client_err = err.downcast_ref::<edgestore_client::ClientError>().unwrap();
        assert!(client_err.is_not_found());
    }
}
