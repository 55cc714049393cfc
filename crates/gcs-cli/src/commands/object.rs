//! Object commands

use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Result;
use gcs_client::{InsertObjectOptions, Storage};

use super::{blank_to_none, print_body, ACL_PROMPT, BUCKET_PROMPT, OBJECT_PROMPT};
use crate::files;
use crate::input::Prompter;

/// Download an object into a local file named by its final path segment
pub async fn get_object<R: BufRead, W: Write>(
    client: &dyn Storage,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let bucket = prompter.required(BUCKET_PROMPT)?;
    let object = prompter.required(OBJECT_PROMPT)?;

    let body = client.get_object(&bucket, &object).await?;
    let file_name = files::download_file_name(&object);
    fs::write(file_name, &body)?;
    println!("File downloaded locally to {}", file_name);
    Ok(())
}

/// Get object ACLs
pub async fn get_object_acls<R: BufRead, W: Write>(
    client: &dyn Storage,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let bucket = prompter.required(BUCKET_PROMPT)?;
    let object = prompter.required(OBJECT_PROMPT)?;
    let body = client.get_object_acls(&bucket, &object).await?;
    print_body(&body);
    Ok(())
}

/// Get object metadata: the status line and the response headers
pub async fn get_object_metadata<R: BufRead, W: Write>(
    client: &dyn Storage,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let bucket = prompter.required(BUCKET_PROMPT)?;
    let object = prompter.required(OBJECT_PROMPT)?;

    let envelope = client.get_object_metadata(&bucket, &object).await?;
    println!("{} {}", envelope.status, envelope.reason);
    let mut headers: Vec<_> = envelope.headers.iter().collect();
    headers.sort();
    for (name, value) in headers {
        println!("{}: {}", name, value);
    }
    Ok(())
}

/// Upload an object. The object name defaults to the file's base name;
/// content type and encoding left blank are inferred by the client.
pub async fn insert_object<R: BufRead, W: Write>(
    client: &dyn Storage,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let entry = prompter.optional("path to file", files::UPLOAD_FILE_NAME)?;
    let path = files::resolve_upload_path(Path::new("."), &entry)?;
    let bucket = prompter.required(BUCKET_PROMPT)?;
    let name = prompter.optional("new name", "file name")?;
    let content_type = prompter.optional("content-type", "best guess")?;
    let encoding = prompter.optional("encoding", "best guess")?;
    let acl = prompter.optional(ACL_PROMPT, "private")?;

    let object = if name.is_empty() {
        files::base_name(&path)
    } else {
        name
    };

    let mut options = InsertObjectOptions::new();
    if !content_type.is_empty() {
        options = options.with_content_type(content_type);
    }
    if !encoding.is_empty() {
        options = options.with_content_encoding(encoding);
    }
    if !acl.is_empty() {
        options = options.with_acl(acl);
    }

    let data = fs::read(&path)?;
    client
        .insert_object(&bucket, &object, data.into(), &options)
        .await?;
    println!("File {} was uploaded.", path.display());
    Ok(())
}

/// Copy an object; the destination name defaults to the source name
pub async fn copy_object<R: BufRead, W: Write>(
    client: &dyn Storage,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let src_bucket = prompter.required("current bucket")?;
    let src_object = prompter.required("object to copy")?;
    let dst_bucket = prompter.required("new bucket")?;
    let dst_entry = prompter.optional("new object name", "original object name")?;
    let acl = prompter.optional(ACL_PROMPT, "private")?;

    let dst_object = if dst_entry.is_empty() {
        src_object.clone()
    } else {
        dst_entry
    };
    client
        .copy_object(
            &src_bucket,
            &src_object,
            &dst_bucket,
            Some(&dst_object),
            blank_to_none(&acl),
        )
        .await?;
    println!("{} has been copied to {}.", dst_object, dst_bucket);
    Ok(())
}

/// Delete an object
pub async fn delete_object<R: BufRead, W: Write>(
    client: &dyn Storage,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let bucket = prompter.required(BUCKET_PROMPT)?;
    let object = prompter.required(OBJECT_PROMPT)?;
    client.delete_object(&bucket, &object).await?;
    println!("{} deleted.", object);
    Ok(())
}
