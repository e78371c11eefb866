use anyhow::Result;
use std::env;
use syno_file_station::client::SynoFS;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let mut synofs = {
        let host = env::var("SYNOLOGY_HOST")?;
        let username = env::var("SYNOLOGY_USERNAME")?;
        let password = env::var("SYNOLOGY_PASSWORD")?;
        SynoFS::builder()
            .host(host)
            .username(username)
            .password(password)
            .build()?
    };

    synofs.authorize().await?;

    let info = synofs.get_info().await?;
    println!("hostname: {}, manager: {}", info.hostname, info.is_manager);

    let shares = synofs.list_shares(false).await?;
    for share in shares.shares {
        println!("share: {}, path: {}", share.name, share.path);
    }

    synofs
        .upload_file("/home", "hello.txt", b"hello from syno-file-station")
        .await?;
    println!("uploaded /home/hello.txt");

    Ok(())
}
