mod cloudinary_host;
mod media_host_factory;

pub use cloudinary_host::CloudinaryMediaHost;
pub use media_host_factory::MediaHostFactory;
