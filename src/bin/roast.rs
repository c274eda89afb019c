use anyhow::{Context, Result, bail};
use bytes::Bytes;
use clap::Parser;
use roast_relay::analysis::UploadedImage;
use roast_relay::client::{
    AnalyzeOutcome, MIN_IMAGES, RelayClient, SOFT_CAP, UploadSession, message_for_status,
    mime_for_path, render_result, shrink_image, spawn_progress_printer,
};
use roast_relay::error::Error;
use std::path::PathBuf;

/// 上传 2-5 张照片，生成一份 AI 毒舌人格鉴定报告
#[derive(Parser, Debug)]
#[command(name = "roast", version)]
struct Args {
    /// 照片路径（2-5 张）
    #[arg(required = true, num_args = 1..)]
    photos: Vec<PathBuf>,

    /// 鉴定服务地址
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    server: String,

    /// 跳过本地压缩，原图直传
    #[arg(long)]
    no_shrink: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut session = UploadSession::new();
    for path in &args.photos {
        let original = std::fs::read(path).with_context(|| format!("读取失败: {}", path.display()))?;
        let mime = mime_for_path(path);

        let (bytes, mime) = if args.no_shrink {
            (original, mime)
        } else {
            shrink_image(&original, &mime)
        };

        if !session.add_image(UploadedImage::new(mime, Bytes::from(bytes))) {
            eprintln!("最多只能选 {} 张照片，多余的已忽略", SOFT_CAP);
            break;
        }
    }

    // Local validation: no network call below the minimum
    if !session.ready() {
        bail!("至少需要 {} 张照片才能开始鉴定", MIN_IMAGES);
    }

    let client = RelayClient::new(&args.server)?;

    let progress = spawn_progress_printer();
    let outcome = client.analyze(session.images()).await;
    progress.abort();

    match outcome {
        Ok(AnalyzeOutcome::Roast(result)) => {
            session.set_result(result);
            if let Some(result) = session.result() {
                println!("{}", render_result(result));
            }
            Ok(())
        }
        Ok(AnalyzeOutcome::Rejected {
            status,
            server_message,
        }) => {
            eprintln!("{}", message_for_status(status));
            if server_message.is_empty() {
                bail!("HTTP {}", status);
            }
            bail!("HTTP {}: {}", status, server_message);
        }
        Err(Error::Network(e)) if e.is_timeout() => {
            eprintln!("模型思考太久了，稍后再试一次");
            bail!("{}", e);
        }
        Err(e) => {
            eprintln!("分析失败了，请稍后重试");
            bail!("{}", e);
        }
    }
}
