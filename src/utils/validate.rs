pub const INVALID_FILE_MESSAGE: &str = "Por favor, selecione um arquivo GIF válido";

pub fn is_gif_filename(name: &str) -> bool {
    name.to_lowercase().ends_with(".gif")
}

pub fn validate_candidate_name(name: &str) -> Result<(), String> {
    if is_gif_filename(name) {
        Ok(())
    } else {
        Err(INVALID_FILE_MESSAGE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_gif_extension_case_insensitive() {
        assert!(is_gif_filename("cat.gif"));
        assert!(is_gif_filename("cat.GIF"));
        assert!(is_gif_filename("cat.Gif"));
        assert!(is_gif_filename("weird name with spaces.gif"));
    }

    #[test]
    fn rejects_everything_else() {
        assert!(!is_gif_filename("photo.png"));
        assert!(!is_gif_filename("animation.gifx"));
        assert!(!is_gif_filename("gif"));
        assert!(!is_gif_filename(""));
    }

    #[test]
    fn rejection_carries_fixed_message() {
        assert_eq!(
            validate_candidate_name("photo.png"),
            Err(INVALID_FILE_MESSAGE.to_string())
        );
        assert_eq!(validate_candidate_name("cat.gif"), Ok(()));
    }
}
