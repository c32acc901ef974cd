//! Class names and element ids shared by the page implementations

#![allow(missing_docs)]

pub const BASE_BUTTON_CLASS: &str = "py-4 px-4 text-white rounded-full font-medium text-2xl transform transition-all duration-200 hover:scale-105 active:scale-95 focus:outline-none select-none";
pub const NUMBER_BUTTON_CLASS: &str = "bg-gray-800 hover:bg-gray-700";
pub const OPERATOR_BUTTON_CLASS: &str = "bg-amber-500 hover:bg-amber-400";
pub const FUNCTION_BUTTON_CLASS: &str = "bg-gray-400 hover:bg-gray-300 text-black";
pub const INPUT_CLASS: &str = "w-full px-4 py-2 bg-gray-800 text-white rounded-lg focus:outline-none focus:ring-2 focus:ring-purple-500 mt-4";
pub const SUBMIT_BUTTON_CLASS: &str = "w-full py-2 bg-purple-600 text-white rounded-lg hover:bg-purple-500 focus:outline-none focus:ring-2 focus:ring-purple-500 transition-all duration-200 mt-2 disabled:opacity-50 disabled:cursor-not-allowed";
pub const SHARE_BUTTON_CLASS: &str = "w-full py-2 bg-blue-600 text-white rounded-lg hover:bg-blue-500 focus:outline-none focus:ring-2 focus:ring-blue-500 transition-all duration-200 mt-2 flex items-center justify-center gap-2";
pub const RESULT_MESSAGE_CLASS: &str = "text-center text-sm";
pub const SUCCESS_MESSAGE_CLASS: &str = "text-center text-sm text-green-500 font-bold mb-4";
pub const ERROR_MESSAGE_CLASS: &str = "text-center text-sm text-red-500";
pub const SUBMIT_FORM_CLASS: &str = "mt-6 space-y-3";
pub const SHARE_CONTAINER_CLASS: &str = "mt-4 animate-bounce";
pub const BODY_DEFAULT_CLASS: &str = "min-h-screen bg-black flex items-center justify-center p-6 transition-all duration-1000";
pub const BODY_SUCCESS_CLASS: &str = "min-h-screen bg-gradient-to-r from-red-400 to-cyan-400 flex items-center justify-center p-6 transition-all duration-1000";

/// Added on keydown, removed on keyup
pub const EMPHASIS_CLASSES: [&str; 4] = ["scale-95", "ring-2", "ring-purple-500", "ring-offset-2"];

pub const DISPLAY_ID: &str = "display";
pub const KEYPAD_ID: &str = "keypad";
pub const RESULT_MESSAGE_ID: &str = "result-message";
pub const SUBMIT_FORM_ID: &str = "submit-form";
pub const FLAG_INPUT_ID: &str = "flag-input";
pub const SUBMIT_BUTTON_ID: &str = "submit-flag";
pub const SHARE_CONTAINER_ID: &str = "share-container";
pub const SHARE_BUTTON_ID: &str = "share-button";

pub const FLAG_PLACEHOLDER: &str = "Enter your flag...";
pub const SUBMIT_LABEL: &str = "Submit Flag";
pub const SUBMIT_HINT: &str = "Check the button's properties carefully...";
pub const SHARE_LABEL: &str = "Share on Facebook";
pub const SHARE_WINDOW_FEATURES: &str = "width=600,height=400";

pub const ALREADY_COMPLETED_MESSAGE: &str = "You have already completed this challenge!";
pub const SOLVED_MESSAGE: &str = "🎉 Congratulations! You solved the challenge!";
pub const INCORRECT_MESSAGE: &str = "Incorrect flag. Keep trying!";
