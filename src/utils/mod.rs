//! 공통 유틸리티 함수 모듈
//! 
//! 애플리케이션 전체에서 사용되는 공통 유틸리티 함수들을 제공합니다.
//! 입력 문자열 정리와 시작 시 터미널 출력을 다룹니다.
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증, 이름 키 정규화, 바코드 형식 검사
//! - [`display_terminal`] - 터미널 출력 포맷팅 함수들
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::string_utils::validate_required_string;
//! use crate::utils::display_terminal::print_boxed_title;
//!
//! let product_name = validate_required_string("  Oat Milk  ", "name")?;
//!
//! print_boxed_title("WASTE PRODUCTS API");
//! ```

pub mod string_utils;
pub mod display_terminal;
