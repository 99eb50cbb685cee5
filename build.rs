#[cfg(target_os = "windows")]
fn main() {
    let mut res = winres::WindowsResource::new();
    res.set("InternalName", "OwnerProbe.exe")
        .set("FileDescription", "Resolve the owner of files and folders")
        .set_version_info(winres::VersionInfo::PRODUCTVERSION, 0x0000000000010000)
        .set_language(0x0409);
    if let Err(err) = res.compile() {
        eprintln!("winres error: {err}");
    }
}

#[cfg(not(target_os = "windows"))]
fn main() {
}
