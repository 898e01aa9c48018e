diesel::table! {
    message (id) {
        id -> Unsigned<Bigint>,
        #[max_length = 255]
        content -> Varchar,
    }
}

pub const CREATE_MESSAGE_TABLE: &str = "CREATE TABLE IF NOT EXISTS message (
    id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT,
    content VARCHAR(255) NOT NULL,
    PRIMARY KEY (id)
) DEFAULT CHARSET=utf8mb4";
