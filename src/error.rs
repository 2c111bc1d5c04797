use custom_error::custom_error;

custom_error! {pub EngineError
    Io {source: std::io::Error} = "I/O error: {source}",
    Image {source: image::ImageError} = "Failed to process image: {source}",
    Obj {source: tobj::LoadError} = "Failed to load OBJ mesh: {source}",
    Scene {source: ron::error::SpannedError} = "Failed to parse scene: {source}",
    InvalidScene {description: String} = "Invalid scene: {description}",
}
