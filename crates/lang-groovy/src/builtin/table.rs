//! Builtin type declarations, one header plus member signatures per type.
//!
//! Simple names refer to other entries of this table.

pub(super) type TypeEntry = (&'static str, &'static [&'static str]);

pub(super) static TYPES: &[TypeEntry] = &[
    // java.lang
    (
        "class java.lang.Object",
        &[
            "new()",
            "boolean equals(Object obj)",
            "int hashCode()",
            "String toString()",
            "Class<?> getClass()",
            "void notify()",
            "void notifyAll()",
            "void wait()",
            "void wait(long timeout)",
        ],
    ),
    ("interface java.lang.Comparable<T>", &["int compareTo(T o)"]),
    ("interface java.lang.Runnable", &["void run()"]),
    ("interface java.lang.AutoCloseable", &["void close()"]),
    ("interface java.lang.Cloneable", &[]),
    ("interface java.lang.Appendable", &["Appendable append(CharSequence csq)"]),
    (
        "interface java.lang.CharSequence",
        &[
            "int length()",
            "char charAt(int index)",
            "CharSequence subSequence(int start, int end)",
            "String toString()",
        ],
    ),
    (
        "interface java.lang.Iterable<T>",
        &[
            "Iterator<T> iterator()",
            "default void forEach(Consumer<? super T> action)",
        ],
    ),
    (
        "class java.lang.String implements CharSequence, Comparable<String>",
        &[
            "new()",
            "new(String original)",
            "new(char[] value)",
            "new(byte[] bytes)",
            "int length()",
            "boolean isEmpty()",
            "boolean isBlank()",
            "char charAt(int index)",
            "String substring(int beginIndex)",
            "String substring(int beginIndex, int endIndex)",
            "int indexOf(String str)",
            "int indexOf(int ch)",
            "int indexOf(String str, int fromIndex)",
            "int lastIndexOf(String str)",
            "int lastIndexOf(int ch)",
            "boolean contains(CharSequence s)",
            "boolean startsWith(String prefix)",
            "boolean endsWith(String suffix)",
            "boolean equalsIgnoreCase(String anotherString)",
            "int compareTo(String anotherString)",
            "int compareToIgnoreCase(String str)",
            "String toUpperCase()",
            "String toLowerCase()",
            "String trim()",
            "String strip()",
            "String concat(String str)",
            "String repeat(int count)",
            "String replace(char oldChar, char newChar)",
            "String replace(CharSequence target, CharSequence replacement)",
            "String replaceAll(String regex, String replacement)",
            "String replaceFirst(String regex, String replacement)",
            "String[] split(String regex)",
            "String[] split(String regex, int limit)",
            "boolean matches(String regex)",
            "char[] toCharArray()",
            "byte[] getBytes()",
            "String intern()",
            "static String valueOf(Object obj)",
            "static String valueOf(int i)",
            "static String valueOf(char[] data)",
            "static String format(String format, Object... args)",
            "static String join(CharSequence delimiter, CharSequence... elements)",
            "static String join(CharSequence delimiter, Iterable<? extends CharSequence> elements)",
        ],
    ),
    (
        "class java.lang.StringBuilder implements CharSequence, Appendable",
        &[
            "new()",
            "new(String str)",
            "new(int capacity)",
            "StringBuilder append(Object obj)",
            "StringBuilder append(String str)",
            "StringBuilder append(CharSequence s)",
            "StringBuilder append(char c)",
            "StringBuilder append(int i)",
            "StringBuilder insert(int offset, String str)",
            "StringBuilder reverse()",
            "StringBuilder deleteCharAt(int index)",
            "void setLength(int newLength)",
            "int length()",
            "String toString()",
        ],
    ),
    (
        "abstract class java.lang.Number",
        &[
            "int intValue()",
            "long longValue()",
            "double doubleValue()",
            "float floatValue()",
            "short shortValue()",
            "byte byteValue()",
        ],
    ),
    (
        "class java.lang.Integer extends Number implements Comparable<Integer>",
        &[
            "new(int value)",
            "int compareTo(Integer anotherInteger)",
            "static int parseInt(String s)",
            "static int parseInt(String s, int radix)",
            "static Integer valueOf(int i)",
            "static Integer valueOf(String s)",
            "static String toString(int i)",
            "static String toHexString(int i)",
            "static String toBinaryString(int i)",
            "static int max(int a, int b)",
            "static int min(int a, int b)",
            "static int sum(int a, int b)",
            "static int MAX_VALUE",
            "static int MIN_VALUE",
        ],
    ),
    (
        "class java.lang.Long extends Number implements Comparable<Long>",
        &[
            "new(long value)",
            "int compareTo(Long anotherLong)",
            "static long parseLong(String s)",
            "static Long valueOf(long l)",
            "static Long valueOf(String s)",
            "static String toString(long i)",
            "static long MAX_VALUE",
            "static long MIN_VALUE",
        ],
    ),
    (
        "class java.lang.Short extends Number implements Comparable<Short>",
        &[
            "int compareTo(Short anotherShort)",
            "static short parseShort(String s)",
            "static Short valueOf(short s)",
        ],
    ),
    (
        "class java.lang.Byte extends Number implements Comparable<Byte>",
        &[
            "int compareTo(Byte anotherByte)",
            "static byte parseByte(String s)",
            "static Byte valueOf(byte b)",
        ],
    ),
    (
        "class java.lang.Double extends Number implements Comparable<Double>",
        &[
            "new(double value)",
            "int compareTo(Double anotherDouble)",
            "boolean isNaN()",
            "boolean isInfinite()",
            "static double parseDouble(String s)",
            "static Double valueOf(double d)",
            "static Double valueOf(String s)",
            "static boolean isNaN(double v)",
            "static double MAX_VALUE",
            "static double NaN",
        ],
    ),
    (
        "class java.lang.Float extends Number implements Comparable<Float>",
        &[
            "int compareTo(Float anotherFloat)",
            "boolean isNaN()",
            "static float parseFloat(String s)",
            "static Float valueOf(float f)",
        ],
    ),
    (
        "class java.lang.Boolean implements Comparable<Boolean>",
        &[
            "boolean booleanValue()",
            "int compareTo(Boolean b)",
            "static boolean parseBoolean(String s)",
            "static Boolean valueOf(boolean b)",
            "static Boolean valueOf(String s)",
            "static Boolean TRUE",
            "static Boolean FALSE",
        ],
    ),
    (
        "class java.lang.Character implements Comparable<Character>",
        &[
            "char charValue()",
            "int compareTo(Character anotherCharacter)",
            "static boolean isDigit(char ch)",
            "static boolean isLetter(char ch)",
            "static boolean isLetterOrDigit(char ch)",
            "static boolean isWhitespace(char ch)",
            "static boolean isUpperCase(char ch)",
            "static char toUpperCase(char ch)",
            "static char toLowerCase(char ch)",
            "static Character valueOf(char c)",
        ],
    ),
    ("class java.lang.Void", &[]),
    (
        "class java.lang.Class<T>",
        &[
            "String getName()",
            "String getSimpleName()",
            "String getCanonicalName()",
            "T newInstance()",
            "T cast(Object obj)",
            "boolean isInstance(Object obj)",
            "boolean isInterface()",
            "boolean isArray()",
            "boolean isEnum()",
            "boolean isAssignableFrom(Class<?> cls)",
            "Class<? super T> getSuperclass()",
            "Class<?>[] getInterfaces()",
            "static Class<?> forName(String className)",
        ],
    ),
    (
        "abstract class java.lang.Enum<E extends Comparable<E>> implements Comparable<E>",
        &["String name()", "int ordinal()", "int compareTo(E o)"],
    ),
    (
        "class java.lang.Math",
        &[
            "static int abs(int a)",
            "static long abs(long a)",
            "static double abs(double a)",
            "static int max(int a, int b)",
            "static long max(long a, long b)",
            "static double max(double a, double b)",
            "static int min(int a, int b)",
            "static long min(long a, long b)",
            "static double min(double a, double b)",
            "static double sqrt(double a)",
            "static double pow(double a, double b)",
            "static double floor(double a)",
            "static double ceil(double a)",
            "static long round(double a)",
            "static double random()",
            "static double PI",
            "static double E",
        ],
    ),
    (
        "class java.lang.System",
        &[
            "static PrintStream out",
            "static PrintStream err",
            "static InputStream in",
            "static long currentTimeMillis()",
            "static long nanoTime()",
            "static String getProperty(String key)",
            "static String getProperty(String key, String def)",
            "static String getenv(String name)",
            "static Map<String, String> getenv()",
            "static String lineSeparator()",
            "static void exit(int status)",
            "static void gc()",
            "static void arraycopy(Object src, int srcPos, Object dest, int destPos, int length)",
        ],
    ),
    (
        "class java.lang.Thread implements Runnable",
        &[
            "new()",
            "new(Runnable target)",
            "new(Runnable target, String name)",
            "void start()",
            "void run()",
            "void join()",
            "void join(long millis)",
            "void interrupt()",
            "boolean isAlive()",
            "boolean isDaemon()",
            "void setDaemon(boolean on)",
            "String getName()",
            "void setName(String name)",
            "static Thread currentThread()",
            "static void sleep(long millis)",
        ],
    ),
    (
        "abstract class java.lang.Process",
        &[
            "OutputStream getOutputStream()",
            "InputStream getInputStream()",
            "InputStream getErrorStream()",
            "int waitFor()",
            "int exitValue()",
            "void destroy()",
            "boolean isAlive()",
        ],
    ),
    (
        "class java.lang.Throwable",
        &[
            "new()",
            "new(String message)",
            "new(String message, Throwable cause)",
            "String getMessage()",
            "String getLocalizedMessage()",
            "Throwable getCause()",
            "void printStackTrace()",
        ],
    ),
    ("class java.lang.Exception extends Throwable", &["new()", "new(String message)"]),
    ("class java.lang.RuntimeException extends Exception", &["new()", "new(String message)"]),
    (
        "class java.lang.IllegalArgumentException extends RuntimeException",
        &["new()", "new(String s)"],
    ),
    (
        "class java.lang.IllegalStateException extends RuntimeException",
        &["new()", "new(String s)"],
    ),
    ("class java.lang.InterruptedException extends Exception", &["new()"]),
    // java.math
    (
        "class java.math.BigDecimal extends Number implements Comparable<BigDecimal>",
        &[
            "new(String val)",
            "new(int val)",
            "new(long val)",
            "new(double val)",
            "BigDecimal add(BigDecimal augend)",
            "BigDecimal subtract(BigDecimal subtrahend)",
            "BigDecimal multiply(BigDecimal multiplicand)",
            "BigDecimal divide(BigDecimal divisor)",
            "BigDecimal remainder(BigDecimal divisor)",
            "BigDecimal pow(int n)",
            "BigDecimal abs()",
            "BigDecimal negate()",
            "BigDecimal setScale(int newScale)",
            "int scale()",
            "int signum()",
            "int compareTo(BigDecimal val)",
            "String toPlainString()",
            "BigInteger toBigInteger()",
            "static BigDecimal valueOf(long val)",
            "static BigDecimal valueOf(double val)",
            "static BigDecimal ZERO",
            "static BigDecimal ONE",
            "static BigDecimal TEN",
        ],
    ),
    (
        "class java.math.BigInteger extends Number implements Comparable<BigInteger>",
        &[
            "new(String val)",
            "BigInteger add(BigInteger val)",
            "BigInteger subtract(BigInteger val)",
            "BigInteger multiply(BigInteger val)",
            "BigInteger divide(BigInteger val)",
            "BigInteger mod(BigInteger m)",
            "BigInteger pow(int exponent)",
            "BigInteger abs()",
            "BigInteger negate()",
            "int compareTo(BigInteger val)",
            "static BigInteger valueOf(long val)",
            "static BigInteger ZERO",
            "static BigInteger ONE",
            "static BigInteger TEN",
        ],
    ),
    // java.util
    (
        "interface java.util.Iterator<E>",
        &["boolean hasNext()", "E next()", "default void remove()"],
    ),
    (
        "interface java.util.Collection<E> extends Iterable<E>",
        &[
            "int size()",
            "boolean isEmpty()",
            "boolean contains(Object o)",
            "boolean containsAll(Collection<?> c)",
            "boolean add(E e)",
            "boolean addAll(Collection<? extends E> c)",
            "boolean remove(Object o)",
            "boolean removeAll(Collection<?> c)",
            "boolean retainAll(Collection<?> c)",
            "void clear()",
            "Object[] toArray()",
            "<T> T[] toArray(T[] a)",
            "default boolean removeIf(Predicate<? super E> filter)",
            "default Stream<E> stream()",
        ],
    ),
    (
        "interface java.util.List<E> extends Collection<E>",
        &[
            "E get(int index)",
            "E set(int index, E element)",
            "void add(int index, E element)",
            "E remove(int index)",
            "int indexOf(Object o)",
            "int lastIndexOf(Object o)",
            "List<E> subList(int fromIndex, int toIndex)",
            "default void sort(Comparator<? super E> c)",
            "default void replaceAll(UnaryOperator<E> operator)",
            "static <T> List<T> of(T... elements)",
            "static <T> List<T> copyOf(Collection<? extends T> coll)",
        ],
    ),
    (
        "class java.util.ArrayList<E> implements List<E>, Cloneable",
        &[
            "new()",
            "new(int initialCapacity)",
            "new(Collection<? extends E> c)",
            "void ensureCapacity(int minCapacity)",
            "void trimToSize()",
        ],
    ),
    (
        "class java.util.LinkedList<E> implements List<E>, Cloneable",
        &[
            "new()",
            "new(Collection<? extends E> c)",
            "E getFirst()",
            "E getLast()",
            "void addFirst(E e)",
            "void addLast(E e)",
            "E removeFirst()",
            "E removeLast()",
            "E peek()",
            "E poll()",
            "void push(E e)",
            "E pop()",
        ],
    ),
    (
        "interface java.util.Set<E> extends Collection<E>",
        &["static <T> Set<T> of(T... elements)"],
    ),
    (
        "class java.util.HashSet<E> implements Set<E>, Cloneable",
        &["new()", "new(int initialCapacity)", "new(Collection<? extends E> c)"],
    ),
    (
        "class java.util.LinkedHashSet<E> extends HashSet<E>",
        &["new()", "new(Collection<? extends E> c)"],
    ),
    (
        "class java.util.TreeSet<E> implements Set<E>, Cloneable",
        &[
            "new()",
            "new(Comparator<? super E> comparator)",
            "new(Collection<? extends E> c)",
            "E first()",
            "E last()",
        ],
    ),
    (
        "interface java.util.Map<K, V>",
        &[
            "int size()",
            "boolean isEmpty()",
            "boolean containsKey(Object key)",
            "boolean containsValue(Object value)",
            "V get(Object key)",
            "V put(K key, V value)",
            "V remove(Object key)",
            "void putAll(Map<? extends K, ? extends V> m)",
            "void clear()",
            "Set<K> keySet()",
            "Collection<V> values()",
            "Set<Map$Entry<K, V>> entrySet()",
            "default V getOrDefault(Object key, V defaultValue)",
            "default V putIfAbsent(K key, V value)",
            "default void forEach(BiConsumer<? super K, ? super V> action)",
            "default V computeIfAbsent(K key, Function<? super K, ? extends V> mappingFunction)",
            "default V merge(K key, V value, BiFunction<? super V, ? super V, ? extends V> remappingFunction)",
            "static <A, B> Map<A, B> of()",
            "static <A, B> Map<A, B> of(A k1, B v1)",
        ],
    ),
    (
        "interface java.util.Map$Entry<K, V>",
        &["K getKey()", "V getValue()", "V setValue(V value)"],
    ),
    (
        "class java.util.HashMap<K, V> implements Map<K, V>, Cloneable",
        &[
            "new()",
            "new(int initialCapacity)",
            "new(Map<? extends K, ? extends V> m)",
        ],
    ),
    (
        "class java.util.LinkedHashMap<K, V> extends HashMap<K, V> implements Map<K, V>",
        &[
            "new()",
            "new(int initialCapacity)",
            "new(Map<? extends K, ? extends V> m)",
        ],
    ),
    (
        "class java.util.TreeMap<K, V> implements Map<K, V>, Cloneable",
        &[
            "new()",
            "new(Comparator<? super K> comparator)",
            "K firstKey()",
            "K lastKey()",
        ],
    ),
    (
        "class java.util.Properties extends HashMap<Object, Object>",
        &[
            "new()",
            "String getProperty(String key)",
            "String getProperty(String key, String defaultValue)",
            "Object setProperty(String key, String value)",
            "void load(InputStream inStream)",
            "void load(Reader reader)",
        ],
    ),
    (
        "interface java.util.Comparator<T>",
        &[
            "int compare(T o1, T o2)",
            "default Comparator<T> reversed()",
            "default Comparator<T> thenComparing(Comparator<? super T> other)",
            "static <A, U extends Comparable<? super U>> Comparator<A> comparing(Function<? super A, ? extends U> keyExtractor)",
        ],
    ),
    (
        "class java.util.Optional<T>",
        &[
            "T get()",
            "boolean isPresent()",
            "boolean isEmpty()",
            "T orElse(T other)",
            "T orElseGet(Supplier<? extends T> supplier)",
            "void ifPresent(Consumer<? super T> action)",
            "<U> Optional<U> map(Function<? super T, ? extends U> mapper)",
            "Optional<T> filter(Predicate<? super T> predicate)",
            "static <A> Optional<A> of(A value)",
            "static <A> Optional<A> ofNullable(A value)",
            "static <A> Optional<A> empty()",
        ],
    ),
    (
        "class java.util.Date implements Comparable<Date>, Cloneable",
        &[
            "new()",
            "new(long date)",
            "long getTime()",
            "void setTime(long time)",
            "boolean before(Date when)",
            "boolean after(Date when)",
            "int compareTo(Date anotherDate)",
        ],
    ),
    (
        "class java.util.Collections",
        &[
            "static <T> List<T> emptyList()",
            "static <A, B> Map<A, B> emptyMap()",
            "static <T> Set<T> emptySet()",
            "static <T> List<T> singletonList(T o)",
            "static <T> List<T> unmodifiableList(List<? extends T> list)",
            "static <T extends Comparable<? super T>> void sort(List<T> list)",
            "static <T> void sort(List<T> list, Comparator<? super T> c)",
            "static void reverse(List<?> list)",
            "static void shuffle(List<?> list)",
        ],
    ),
    (
        "class java.util.Arrays",
        &[
            "static <T> List<T> asList(T... a)",
            "static String toString(Object[] a)",
            "static String toString(int[] a)",
            "static void sort(int[] a)",
            "static void sort(Object[] a)",
            "static <T> void sort(T[] a, Comparator<? super T> c)",
            "static <T> Stream<T> stream(T[] array)",
        ],
    ),
    (
        "class java.util.Random",
        &[
            "new()",
            "new(long seed)",
            "int nextInt()",
            "int nextInt(int bound)",
            "long nextLong()",
            "double nextDouble()",
            "boolean nextBoolean()",
        ],
    ),
    (
        "class java.util.UUID implements Comparable<UUID>",
        &[
            "String toString()",
            "int compareTo(UUID val)",
            "static UUID randomUUID()",
            "static UUID fromString(String name)",
        ],
    ),
    // java.util.function
    (
        "interface java.util.function.Function<T, R>",
        &[
            "R apply(T t)",
            "default <V> Function<T, V> andThen(Function<? super R, ? extends V> after)",
        ],
    ),
    ("interface java.util.function.BiFunction<T, U, R>", &["R apply(T t, U u)"]),
    ("interface java.util.function.UnaryOperator<T> extends Function<T, T>", &[]),
    ("interface java.util.function.BinaryOperator<T> extends BiFunction<T, T, T>", &[]),
    (
        "interface java.util.function.Consumer<T>",
        &[
            "void accept(T t)",
            "default Consumer<T> andThen(Consumer<? super T> after)",
        ],
    ),
    ("interface java.util.function.BiConsumer<T, U>", &["void accept(T t, U u)"]),
    (
        "interface java.util.function.Predicate<T>",
        &[
            "boolean test(T t)",
            "default Predicate<T> negate()",
            "default Predicate<T> and(Predicate<? super T> other)",
        ],
    ),
    ("interface java.util.function.Supplier<T>", &["T get()"]),
    (
        "interface java.util.stream.Stream<T> extends AutoCloseable",
        &[
            "<R> Stream<R> map(Function<? super T, ? extends R> mapper)",
            "<R> Stream<R> flatMap(Function<? super T, ? extends Stream<? extends R>> mapper)",
            "Stream<T> filter(Predicate<? super T> predicate)",
            "Stream<T> sorted()",
            "Stream<T> sorted(Comparator<? super T> comparator)",
            "Stream<T> distinct()",
            "Stream<T> limit(long maxSize)",
            "Stream<T> skip(long n)",
            "void forEach(Consumer<? super T> action)",
            "boolean anyMatch(Predicate<? super T> predicate)",
            "boolean allMatch(Predicate<? super T> predicate)",
            "Optional<T> findFirst()",
            "T reduce(T identity, BinaryOperator<T> accumulator)",
            "long count()",
            "Object[] toArray()",
            "List<T> toList()",
            "static <A> Stream<A> of(A... values)",
        ],
    ),
    // java.util.regex
    (
        "class java.util.regex.Pattern",
        &[
            "Matcher matcher(CharSequence input)",
            "String pattern()",
            "String[] split(CharSequence input)",
            "int flags()",
            "static Pattern compile(String regex)",
            "static Pattern compile(String regex, int flags)",
            "static boolean matches(String regex, CharSequence input)",
            "static String quote(String s)",
            "static int CASE_INSENSITIVE",
            "static int MULTILINE",
        ],
    ),
    (
        "class java.util.regex.Matcher",
        &[
            "boolean matches()",
            "boolean find()",
            "boolean lookingAt()",
            "String group()",
            "String group(int group)",
            "String group(String name)",
            "int groupCount()",
            "int start()",
            "int end()",
            "String replaceAll(String replacement)",
            "String replaceFirst(String replacement)",
            "Matcher reset()",
        ],
    ),
    // java.io
    ("interface java.io.Closeable extends AutoCloseable", &["void close()"]),
    ("interface java.io.Flushable", &["void flush()"]),
    ("interface java.io.Serializable", &[]),
    ("class java.io.IOException extends Exception", &["new()", "new(String message)"]),
    (
        "class java.io.File implements Comparable<File>, Serializable",
        &[
            "new(String pathname)",
            "new(String parent, String child)",
            "new(File parent, String child)",
            "new(URI uri)",
            "String getName()",
            "String getPath()",
            "String getAbsolutePath()",
            "File getAbsoluteFile()",
            "String getCanonicalPath()",
            "String getParent()",
            "File getParentFile()",
            "boolean exists()",
            "boolean isFile()",
            "boolean isDirectory()",
            "boolean isHidden()",
            "boolean canRead()",
            "boolean canWrite()",
            "long length()",
            "long lastModified()",
            "boolean delete()",
            "boolean mkdir()",
            "boolean mkdirs()",
            "boolean createNewFile()",
            "boolean renameTo(File dest)",
            "String[] list()",
            "File[] listFiles()",
            "URI toURI()",
            "int compareTo(File pathname)",
            "static File createTempFile(String prefix, String suffix)",
            "static String separator",
            "static String pathSeparator",
        ],
    ),
    (
        "abstract class java.io.InputStream implements Closeable",
        &[
            "int read()",
            "int read(byte[] b)",
            "int read(byte[] b, int off, int len)",
            "byte[] readAllBytes()",
            "long skip(long n)",
            "int available()",
            "void mark(int readlimit)",
            "void reset()",
            "void close()",
        ],
    ),
    (
        "abstract class java.io.OutputStream implements Closeable, Flushable",
        &[
            "void write(int b)",
            "void write(byte[] b)",
            "void write(byte[] b, int off, int len)",
            "void flush()",
            "void close()",
        ],
    ),
    (
        "class java.io.FileInputStream extends InputStream",
        &["new(File file)", "new(String name)"],
    ),
    (
        "class java.io.FileOutputStream extends OutputStream",
        &[
            "new(File file)",
            "new(String name)",
            "new(File file, boolean append)",
        ],
    ),
    (
        "class java.io.BufferedInputStream extends InputStream",
        &["new(InputStream in)"],
    ),
    (
        "class java.io.BufferedOutputStream extends OutputStream",
        &["new(OutputStream out)"],
    ),
    (
        "class java.io.ByteArrayInputStream extends InputStream",
        &["new(byte[] buf)"],
    ),
    (
        "class java.io.ByteArrayOutputStream extends OutputStream",
        &[
            "new()",
            "byte[] toByteArray()",
            "int size()",
            "void reset()",
            "String toString()",
        ],
    ),
    (
        "class java.io.DataInputStream extends InputStream",
        &[
            "new(InputStream in)",
            "int readInt()",
            "long readLong()",
            "boolean readBoolean()",
            "double readDouble()",
            "String readUTF()",
            "void readFully(byte[] b)",
        ],
    ),
    (
        "class java.io.DataOutputStream extends OutputStream",
        &[
            "new(OutputStream out)",
            "void writeInt(int v)",
            "void writeLong(long v)",
            "void writeBoolean(boolean v)",
            "void writeDouble(double v)",
            "void writeUTF(String str)",
            "int size()",
        ],
    ),
    (
        "class java.io.PrintStream extends OutputStream implements Appendable",
        &[
            "new(OutputStream out)",
            "new(File file)",
            "void print(Object obj)",
            "void print(String s)",
            "void println()",
            "void println(Object x)",
            "void println(String x)",
            "PrintStream printf(String format, Object... args)",
            "PrintStream format(String format, Object... args)",
        ],
    ),
    (
        "abstract class java.io.Reader implements Closeable",
        &[
            "int read()",
            "int read(char[] cbuf)",
            "long skip(long n)",
            "boolean ready()",
            "boolean markSupported()",
            "void mark(int readAheadLimit)",
            "void reset()",
            "void close()",
        ],
    ),
    (
        "class java.io.BufferedReader extends Reader",
        &[
            "new(Reader in)",
            "new(Reader in, int sz)",
            "String readLine()",
            "Stream<String> lines()",
        ],
    ),
    (
        "class java.io.InputStreamReader extends Reader",
        &[
            "new(InputStream in)",
            "new(InputStream in, String charsetName)",
            "String getEncoding()",
        ],
    ),
    (
        "class java.io.FileReader extends InputStreamReader",
        &["new(File file)", "new(String fileName)"],
    ),
    ("class java.io.StringReader extends Reader", &["new(String s)"]),
    (
        "abstract class java.io.Writer implements Appendable, Closeable, Flushable",
        &[
            "void write(int c)",
            "void write(String str)",
            "void write(char[] cbuf)",
            "Writer append(CharSequence csq)",
            "Writer append(char c)",
            "void flush()",
            "void close()",
        ],
    ),
    (
        "class java.io.BufferedWriter extends Writer",
        &["new(Writer out)", "new(Writer out, int sz)", "void newLine()"],
    ),
    (
        "class java.io.OutputStreamWriter extends Writer",
        &[
            "new(OutputStream out)",
            "new(OutputStream out, String charsetName)",
            "String getEncoding()",
        ],
    ),
    (
        "class java.io.FileWriter extends OutputStreamWriter",
        &[
            "new(File file)",
            "new(String fileName)",
            "new(File file, boolean append)",
            "new(String fileName, boolean append)",
        ],
    ),
    (
        "class java.io.StringWriter extends Writer",
        &["new()", "String toString()"],
    ),
    (
        "class java.io.PrintWriter extends Writer",
        &[
            "new(Writer out)",
            "new(OutputStream out)",
            "new(File file)",
            "new(String fileName)",
            "void print(Object obj)",
            "void print(String s)",
            "void println()",
            "void println(Object x)",
            "void println(String x)",
            "PrintWriter printf(String format, Object... args)",
            "PrintWriter format(String format, Object... args)",
            "boolean checkError()",
        ],
    ),
    // java.net
    (
        "class java.net.URI implements Comparable<URI>",
        &[
            "new(String str)",
            "String getPath()",
            "String getHost()",
            "String getScheme()",
            "int getPort()",
            "URL toURL()",
            "int compareTo(URI that)",
            "static URI create(String str)",
        ],
    ),
    (
        "class java.net.URL",
        &[
            "new(String spec)",
            "String getHost()",
            "String getPath()",
            "String getProtocol()",
            "int getPort()",
            "InputStream openStream()",
            "URI toURI()",
        ],
    ),
    // groovy.lang
    (
        "interface groovy.lang.GroovyObject",
        &[
            "Object invokeMethod(String name, Object args)",
            "Object getProperty(String propertyName)",
            "void setProperty(String propertyName, Object newValue)",
            "MetaClass getMetaClass()",
            "void setMetaClass(MetaClass metaClass)",
        ],
    ),
    (
        "interface groovy.lang.MetaClass",
        &[
            "Object invokeMethod(Object object, String methodName, Object[] arguments)",
            "Object getProperty(Object object, String property)",
            "void setProperty(Object object, String property, Object newValue)",
            "List getMethods()",
            "List getProperties()",
            "Class getTheClass()",
            "boolean respondsTo(Object obj, String name)",
            "boolean hasProperty(Object obj, String name)",
        ],
    ),
    (
        "abstract class groovy.lang.Closure<V> implements GroovyObject, Runnable, Cloneable",
        &[
            "V call()",
            "V call(Object... args)",
            "V call(Object arguments)",
            "Object getDelegate()",
            "void setDelegate(Object delegate)",
            "Object getOwner()",
            "Object getThisObject()",
            "int getResolveStrategy()",
            "void setResolveStrategy(int resolveStrategy)",
            "int getMaximumNumberOfParameters()",
            "Class[] getParameterTypes()",
            "Closure<V> curry(Object... arguments)",
            "Closure<V> rcurry(Object... arguments)",
            "Closure<V> memoize()",
            "Closure<V> trampoline()",
            "Closure<V> dehydrate()",
            "Closure<V> rehydrate(Object delegate, Object owner, Object thisObject)",
            "<W> Closure<W> rightShift(Closure<W> other)",
            "void run()",
            "static int OWNER_FIRST",
            "static int DELEGATE_FIRST",
            "static int OWNER_ONLY",
            "static int DELEGATE_ONLY",
        ],
    ),
    (
        "class groovy.lang.Binding implements GroovyObject",
        &[
            "new()",
            "new(Map variables)",
            "Object getVariable(String name)",
            "void setVariable(String name, Object value)",
            "boolean hasVariable(String name)",
            "Map getVariables()",
        ],
    ),
    (
        "abstract class groovy.lang.Script implements GroovyObject",
        &[
            "Object run()",
            "Binding getBinding()",
            "void setBinding(Binding binding)",
            "Object getProperty(String property)",
            "void setProperty(String property, Object newValue)",
            "Object invokeMethod(String name, Object args)",
            "void print(Object value)",
            "void println()",
            "void println(Object value)",
            "void printf(String format, Object value)",
            "void printf(String format, Object[] values)",
            "Object evaluate(String expression)",
            "Object evaluate(File file)",
            "void run(File file, String[] arguments)",
        ],
    ),
    (
        "abstract class groovy.lang.GString implements CharSequence, Comparable, GroovyObject",
        &[
            "String toString()",
            "Object[] getValues()",
            "String[] getStrings()",
            "Object getValue(int idx)",
            "int getValueCount()",
            "int length()",
            "GString plus(GString that)",
            "GString plus(String that)",
        ],
    ),
    (
        "interface groovy.lang.Range<T extends Comparable> extends List<T>",
        &[
            "T getFrom()",
            "T getTo()",
            "boolean isReverse()",
            "boolean containsWithinBounds(Object o)",
            "List<T> step(int step)",
            "void step(int step, Closure closure)",
            "String inspect()",
        ],
    ),
    (
        "class groovy.lang.IntRange implements Range<Integer>",
        &[
            "new(int from, int to)",
            "int getFromInt()",
            "int getToInt()",
            "Integer getFrom()",
            "Integer getTo()",
        ],
    ),
    (
        "interface groovy.lang.Writable",
        &["Writer writeTo(Writer out)"],
    ),
    // groovy.io, groovy.time
    (
        "enum groovy.io.FileType",
        &[
            "static FileType FILES",
            "static FileType DIRECTORIES",
            "static FileType ANY",
        ],
    ),
    (
        "abstract class groovy.time.BaseDuration implements Comparable<BaseDuration>",
        &[
            "int getYears()",
            "int getMonths()",
            "int getDays()",
            "int getHours()",
            "int getMinutes()",
            "int getSeconds()",
            "int getMillis()",
            "Date getAgo()",
            "Date plus(Date date)",
            "long toMilliseconds()",
        ],
    ),
    (
        "class groovy.time.Duration extends BaseDuration",
        &[
            "new(int days, int hours, int minutes, int seconds, int millis)",
            "Duration plus(Duration rhs)",
            "Duration minus(Duration rhs)",
            "Date getAgo()",
            "Date getFrom()",
        ],
    ),
    (
        "class groovy.time.TimeDuration extends Duration",
        &[
            "new(int hours, int minutes, int seconds, int millis)",
            "new(int days, int hours, int minutes, int seconds, int millis)",
        ],
    ),
    (
        "class groovy.time.TimeCategory",
        &[
            "static Duration getDays(Integer self)",
            "static Duration getDay(Integer self)",
            "static Duration getWeeks(Integer self)",
            "static Duration getWeek(Integer self)",
            "static TimeDuration getHours(Integer self)",
            "static TimeDuration getHour(Integer self)",
            "static TimeDuration getMinutes(Integer self)",
            "static TimeDuration getMinute(Integer self)",
            "static TimeDuration getSeconds(Integer self)",
            "static TimeDuration getSecond(Integer self)",
            "static TimeDuration getMilliseconds(Integer self)",
            "static Date plus(Date date, BaseDuration duration)",
            "static Date minus(Date date, BaseDuration duration)",
            "static TimeDuration minus(Date lhs, Date rhs)",
            "static Duration getDaylightSavingsOffset(Date self)",
        ],
    ),
];
